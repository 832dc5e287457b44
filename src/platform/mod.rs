// Platform-specific terminal handling

pub mod terminal;

pub use terminal::TerminalSession;
