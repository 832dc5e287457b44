// Progress table library - public API

// Re-export error types
pub mod error;
pub use error::{Error, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::{Config, RefreshScheduler};
pub use platform::TerminalSession;
pub use ui::{BlankBlock, Block, InfoBlock, Line, ProgressBarBlock, ProgressLine, WindowTable};

use std::fs::OpenOptions;
use std::path::Path;

/// Initialize logging.
///
/// While the table owns the terminal, log lines on stderr would tear the
/// display, so `log_file` lets callers send them to a file instead.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env();

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
