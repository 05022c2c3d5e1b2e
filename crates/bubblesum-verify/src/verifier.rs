//! The verification driver.
//!
//! Checks manifest entries against freshly computed digests. Entries are
//! independent, so they are processed through a bounded pool of in-flight
//! futures; results are still collected in manifest order.

use std::path::{Path, PathBuf};

use bubblesum_core::EncodedString;
use futures::stream::{self, StreamExt};

use crate::error::{DigestSourceError, Result, VerifyError};
use crate::manifest::{Manifest, ManifestEntry};
use crate::report::{EntryOutcome, FailureCause, VerificationReport, VerificationResult};
use crate::source::DigestSource;

/// Configuration for verification runs.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Maximum number of entries hashed concurrently. Zero is treated as one.
    pub jobs: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// Outcome of hashing one file for manifest generation.
#[derive(Debug)]
pub struct HashOutcome {
    pub path: PathBuf,
    pub result: std::result::Result<EncodedString, DigestSourceError>,
}

/// Verifies manifests using a [`DigestSource`].
pub struct Verifier<S: DigestSource> {
    source: S,
    config: VerifierConfig,
}

impl<S: DigestSource> Verifier<S> {
    /// Create a new verifier.
    pub fn new(source: S, config: VerifierConfig) -> Self {
        Self { source, config }
    }

    /// Get the digest source.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify entries, in order.
    ///
    /// Every entry is evaluated; one failure never stops the rest.
    pub async fn verify(&self, entries: &[ManifestEntry]) -> VerificationReport {
        let outcomes = stream::iter(entries)
            .map(|entry| self.verify_entry(entry))
            .buffered(self.jobs())
            .collect::<Vec<_>>()
            .await;

        VerificationReport::new(outcomes)
    }

    /// Verify a parsed manifest, counting its malformed lines as failures.
    ///
    /// A manifest without a single well-formed entry is an error.
    pub async fn verify_manifest(&self, manifest: &Manifest) -> Result<VerificationReport> {
        if manifest.is_empty() {
            return Err(VerifyError::EmptyManifest);
        }

        let mut report = self.verify(&manifest.entries).await;
        report.malformed_lines = manifest.errors.len();

        tracing::debug!(
            "Verified {} entries: {} ok, {} failed, {} missing, {} malformed",
            report.outcomes.len(),
            report.ok_count(),
            report.failed_count(),
            report.missing_count(),
            report.malformed_lines
        );

        Ok(report)
    }

    /// Verify a single entry.
    pub async fn verify_entry(&self, entry: &ManifestEntry) -> EntryOutcome {
        EntryOutcome {
            line: entry.line,
            filename: entry.filename.clone(),
            result: self.check(entry).await,
        }
    }

    /// Compute encodings for files, in order, for writing a manifest.
    pub async fn hash(&self, paths: &[PathBuf]) -> Vec<HashOutcome> {
        stream::iter(paths)
            .map(|path| async move {
                HashOutcome {
                    path: path.clone(),
                    result: self.encode_file(path).await,
                }
            })
            .buffered(self.jobs())
            .collect()
            .await
    }

    async fn check(&self, entry: &ManifestEntry) -> VerificationResult {
        let path = &entry.filename;

        if let Err(e) = ensure_readable(path).await {
            tracing::debug!("{}: missing ({})", path.display(), e);
            return VerificationResult::Missing(e.to_string());
        }

        // One digest computation per entry
        match self.source.digest(path).await {
            Ok(digest) => {
                let actual = digest.to_babble();
                if actual == entry.expected {
                    VerificationResult::Ok
                } else {
                    tracing::debug!(
                        "{}: expected {}, computed {}",
                        path.display(),
                        entry.expected,
                        actual
                    );
                    VerificationResult::Failed(FailureCause::Mismatch)
                }
            }
            Err(e) => {
                tracing::debug!("Digest failed for {}: {}", path.display(), e);
                VerificationResult::Failed(FailureCause::DigestSource(e.to_string()))
            }
        }
    }

    async fn encode_file(
        &self,
        path: &Path,
    ) -> std::result::Result<EncodedString, DigestSourceError> {
        ensure_readable(path).await?;
        let digest = self.source.digest(path).await?;
        Ok(digest.to_babble())
    }

    fn jobs(&self) -> usize {
        self.config.jobs.max(1)
    }
}

/// Succeeds if `path` is a file that can be opened for reading.
async fn ensure_readable(path: &Path) -> std::io::Result<()> {
    let metadata = tokio::fs::metadata(path).await?;
    if metadata.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "is a directory",
        ));
    }
    tokio::fs::File::open(path).await?;
    Ok(())
}
