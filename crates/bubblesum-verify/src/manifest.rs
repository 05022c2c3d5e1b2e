//! Checksum manifest parsing.
//!
//! A manifest is line oriented, in the same shape `sha256sum` emits:
//!
//! ```text
//! xesef-disof-gytuf-katof-movif-baxux  notes.txt
//! xigak-nyryk-humil-bosek-sonax *image.bin
//! ```
//!
//! The hash is followed by whitespace and the filename. A single `*`
//! directly before the filename marks binary mode and is not part of the
//! name.

use std::fmt;
use std::path::{Path, PathBuf};

use bubblesum_core::EncodedString;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::error::{ManifestError, Result, VerifyError};

/// Marker placed before the filename for binary-mode entries.
pub const BINARY_MARKER: char = '*';

/// One parsed manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// 1-based line number in the manifest.
    pub line: usize,
    /// The expected encoded hash.
    pub expected: EncodedString,
    /// File to check, with any binary marker removed.
    pub filename: PathBuf,
    /// Whether the entry was written in binary mode (`*filename`).
    pub binary: bool,
}

impl ManifestEntry {
    /// Parse a single manifest line.
    pub fn parse_line(line: usize, text: &str) -> std::result::Result<Self, ManifestError> {
        let trimmed = text.trim_start();
        if trimmed.trim_end().is_empty() {
            return Err(ManifestError::Blank { line });
        }

        let (hash, rest) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| ManifestError::MissingFilename {
                line,
                text: text.to_string(),
            })?;

        let rest = rest.trim_start_matches([' ', '\t']);
        let (filename, binary) = match rest.strip_prefix(BINARY_MARKER) {
            Some(name) => (name, true),
            None => (rest, false),
        };

        if filename.is_empty() {
            return Err(ManifestError::MissingFilename {
                line,
                text: text.to_string(),
            });
        }

        let expected = EncodedString::parse(hash).map_err(|source| ManifestError::InvalidHash {
            line,
            text: hash.to_string(),
            source,
        })?;

        Ok(Self {
            line,
            expected,
            filename: PathBuf::from(filename),
            binary,
        })
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_line(&self.expected, &self.filename, self.binary))
    }
}

/// Render a manifest line for `filename`.
///
/// The output parses back into an equivalent [`ManifestEntry`].
pub fn format_line(expected: &EncodedString, filename: &Path, binary: bool) -> String {
    let marker = if binary { BINARY_MARKER } else { ' ' };
    format!("{} {}{}", expected, marker, filename.display())
}

/// A parsed manifest: the entries that parsed, and the lines that didn't.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Well-formed entries, in file order.
    pub entries: Vec<ManifestEntry>,
    /// Malformed lines, in file order.
    pub errors: Vec<ManifestError>,
}

impl Manifest {
    /// Parse manifest text.
    ///
    /// Every line is either an entry or an error; nothing is skipped. A
    /// trailing newline at end of input does not count as a line.
    pub fn parse(text: &str) -> Self {
        let mut manifest = Manifest::default();

        for (index, raw) in text.lines().enumerate() {
            match ManifestEntry::parse_line(index + 1, raw) {
                Ok(entry) => manifest.entries.push(entry),
                Err(e) => {
                    tracing::debug!("Malformed manifest line: {}", e);
                    manifest.errors.push(e);
                }
            }
        }

        manifest
    }

    /// Read and parse a manifest file. The path `-` reads standard input.
    pub async fn read(path: &Path) -> Result<Self> {
        let read_error = |source| VerifyError::ManifestRead {
            path: path.to_path_buf(),
            source,
        };

        let text = if path == Path::new("-") {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(read_error)?;
            text
        } else {
            tokio::fs::read_to_string(path).await.map_err(read_error)?
        };

        Ok(Self::parse(&text))
    }

    /// Total number of lines seen, well-formed or not.
    pub fn line_count(&self) -> usize {
        self.entries.len() + self.errors.len()
    }

    /// True when no line parsed as an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
