// Core runtime module

pub mod config;
pub mod refresh;

// Re-export commonly used items
pub use config::Config;
pub use refresh::RefreshScheduler;
