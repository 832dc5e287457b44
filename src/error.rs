use std::io;
use thiserror::Error;

/// Error type for the progress table
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Terminal setup failed (width query, raw mode or cursor position reply)
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A line was rejected by `WindowTable::add_line`
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The refresh task panicked or was aborted
    #[error("Refresh task failed: {0}")]
    Refresh(String),
}

/// Result type alias for the progress table
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a terminal error
    pub fn terminal<S: Into<String>>(msg: S) -> Self {
        Error::Terminal(msg.into())
    }

    /// Create a layout error
    pub fn layout<S: Into<String>>(msg: S) -> Self {
        Error::Layout(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn is_layout(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Error::Terminal(_))
    }
}
