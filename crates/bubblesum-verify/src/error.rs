//! Error types for the verify module.

use std::path::PathBuf;
use std::time::Duration;

use bubblesum_core::CodecError;
use thiserror::Error;

/// A manifest line that could not be parsed.
///
/// These are reported per line; they never abort parsing of the rest of
/// the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// Empty or whitespace-only line.
    #[error("line {line}: blank line")]
    Blank { line: usize },

    /// A hash with nothing after it.
    #[error("line {line}: missing filename: {text:?}")]
    MissingFilename { line: usize, text: String },

    /// The hash field is not a valid Bubble Babble string.
    #[error("line {line}: invalid hash {text:?}: {source}")]
    InvalidHash {
        line: usize,
        text: String,
        #[source]
        source: CodecError,
    },
}

impl ManifestError {
    /// The 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ManifestError::Blank { line }
            | ManifestError::MissingFilename { line, .. }
            | ManifestError::InvalidHash { line, .. } => *line,
        }
    }
}

/// Failure of the collaborator that turns a file into digest bytes.
#[derive(Debug, Error)]
pub enum DigestSourceError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The hasher program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The hasher program exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The hasher program did not finish in time.
    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    /// The hasher produced something that is not a hex digest.
    #[error("invalid digest output: {0}")]
    InvalidOutput(String),

    /// No digest is known for the path.
    #[error("no digest for {}", .0.display())]
    NotFound(PathBuf),
}

/// Errors that affect a whole verification run rather than one entry.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The manifest itself could not be read.
    #[error("failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing in the manifest parsed as an entry.
    #[error("no properly formatted checksum lines found")]
    EmptyManifest,
}

/// Result type for verify operations.
pub type Result<T> = std::result::Result<T, VerifyError>;
