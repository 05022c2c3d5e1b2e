//! Error types for the bubblesum tool layer.

use bubblesum_core::CodecError;
use bubblesum_verify::VerifyError;
use thiserror::Error;

/// Errors that can occur while running a bubblesum command.
///
/// Per-file problems never show up here; they are part of the report.
#[derive(Debug, Error)]
pub enum BubblesumError {
    /// Invalid hex digest or Bubble Babble string on the command line.
    #[error("{0}")]
    Codec(#[from] CodecError),

    /// Whole-manifest verification error.
    #[error("{0}")]
    Verify(#[from] VerifyError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the JSON report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for bubblesum commands.
pub type Result<T> = std::result::Result<T, BubblesumError>;
