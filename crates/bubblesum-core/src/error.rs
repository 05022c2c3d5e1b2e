//! Error types for bubblesum core.

use thiserror::Error;

/// Errors produced at the codec boundary: decoding Bubble Babble strings
/// and parsing hexadecimal digests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input does not have the structure of the expected encoding.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The embedded checksum disagrees with the decoded data.
    #[error("checksum mismatch at offset {offset}")]
    ChecksumMismatch { offset: usize },
}

impl From<hex::FromHexError> for CodecError {
    fn from(e: hex::FromHexError) -> Self {
        CodecError::MalformedInput(format!("invalid hex digest: {}", e))
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
