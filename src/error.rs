//! Error types for the wire-protocol server.

use thiserror::Error;

/// Result alias for codec and server operations.
pub type Result<T> = std::result::Result<T, TidewireError>;

/// Errors that can occur while decoding frames or serving connections.
#[derive(Error, Debug)]
pub enum TidewireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A decode ran off the end of the buffer.
    #[error("Truncated {0}")]
    Truncated(&'static str),

    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },

    #[error("Config error: {0}")]
    Config(String),
}
