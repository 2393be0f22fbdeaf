//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// No candidate serial device could be opened
    #[error("Serial error")]
    TransportUnavailable,

    /// Raw command text is not an even-length hex string
    #[error("Malformed hex command: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    /// Writing a frame to the serial device failed
    #[error("Write failed: {0}")]
    WriteFailure(String),

    /// Any other transport fault
    #[error("Unexpected transport error: {0}")]
    Unexpected(String),

    /// Serial port layer error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// File or stream I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a write failure with message
    pub fn write_failure(msg: impl Into<String>) -> Self {
        Self::WriteFailure(msg.into())
    }

    /// Create an unexpected transport error with message
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }
}
