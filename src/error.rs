//! Error types for gzsniff operations.

use std::io;

use thiserror::Error;

use crate::format::CompressionFormat;

/// The main error type for gzsniff operations.
///
/// Note that "the buffer is not gzip" is never an error: the conditional
/// decoder treats it as a normal branch and returns the input unchanged.
#[derive(Debug, Error)]
pub enum GzSniffError {
    /// I/O error from an underlying reader.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or truncated compressed stream.
    ///
    /// Decoding is all-or-nothing: on this error no partial output is
    /// returned and the raw input is not substituted for it.
    #[error("corrupt {format} stream: {message}")]
    Decode {
        /// The format the stream claimed to be.
        format: CompressionFormat,
        /// Description from the decompression primitive.
        message: String,
    },
}

/// Result type alias for gzsniff operations.
pub type Result<T> = std::result::Result<T, GzSniffError>;

impl GzSniffError {
    /// Create a decode error.
    pub fn decode(format: CompressionFormat, message: impl Into<String>) -> Self {
        Self::Decode {
            format,
            message: message.into(),
        }
    }
}
