//! # bubblesum verify
//!
//! Manifest verification for bubblesum: parse a checksum manifest, recompute
//! each file's Bubble Babble hash through a [`DigestSource`], and report.
//!
//! ## Overview
//!
//! - [`Manifest`] - Parsed manifest, with per-line errors kept alongside entries
//! - [`DigestSource`] - Turns a file path into digest bytes
//! - [`Verifier`] - Bounded-concurrency driver producing a [`VerificationReport`]
//!
//! ## Key Properties
//!
//! - **Fail-soft**: A missing file or hasher failure affects only its entry
//! - **Ordered**: Report lines follow manifest order regardless of concurrency
//! - **Single pass**: Each entry's digest is computed exactly once
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bubblesum_verify::{CommandSource, Manifest, Verifier, VerifierConfig};
//! use std::path::Path;
//!
//! async fn example() {
//!     let manifest = Manifest::read(Path::new("SHA256SUMS.bubble")).await.unwrap();
//!     let verifier = Verifier::new(CommandSource::default(), VerifierConfig::default());
//!
//!     let report = verifier.verify_manifest(&manifest).await.unwrap();
//!     for line in report.lines() {
//!         println!("{}", line);
//!     }
//!     std::process::exit(report.status());
//! }
//! ```

pub mod error;
pub mod manifest;
pub mod report;
pub mod source;
pub mod verifier;

pub use error::{DigestSourceError, ManifestError, Result, VerifyError};
pub use manifest::{format_line, Manifest, ManifestEntry, BINARY_MARKER};
pub use report::{
    EntryOutcome, FailureCause, VerificationReport, VerificationResult, STATUS_FAILED, STATUS_OK,
};
pub use source::{
    parse_digest_output, BlockingSource, CommandSource, CommandSourceConfig, DigestSource,
    MemorySource,
};
pub use verifier::{HashOutcome, Verifier, VerifierConfig};
