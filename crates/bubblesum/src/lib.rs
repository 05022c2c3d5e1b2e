//! # bubblesum
//!
//! Bubble Babble checksums: turn binary digests into pronounceable strings
//! and verify files against manifests of them.
//!
//! ## Overview
//!
//! - **Codec**: [`encode`] / [`decode`] implement Bubble Babble, including
//!   its embedded checksum
//! - **Verification**: [`Verifier`] checks a [`Manifest`] against digests
//!   from an injected [`DigestSource`]
//! - **Tool**: the `bubblesum` binary (`hash`, `check`, `encode`, `decode`)
//!
//! bubblesum computes no hashes itself. The default [`CommandSource`] runs an
//! external `*sum` program and reads the hex digest it prints.
//!
//! ## Usage
//!
//! ```rust
//! use bubblesum::{Digest, Manifest};
//!
//! let digest = Digest::from_hex("31323334353637383930").unwrap();
//! let encoded = digest.to_babble();
//! assert_eq!(encoded.as_str(), "xesef-disof-gytuf-katof-movif-baxux");
//!
//! let manifest = Manifest::parse(&format!("{}  *release.tar", encoded));
//! assert_eq!(manifest.entries[0].filename.to_str(), Some("release.tar"));
//! ```
//!
//! ## Re-exports
//!
//! - `bubblesum::core` - Codec and digest types
//! - `bubblesum::verify` - Manifests, digest sources, verifier

pub mod cli;
pub mod commands;
pub mod error;

// Re-export component crates
pub use bubblesum_core as core;
pub use bubblesum_verify as verify;

pub use error::{BubblesumError, Result};

// Re-export commonly used types
pub use bubblesum_core::{decode, encode, CodecError, Digest, EncodedString};
pub use bubblesum_verify::{
    BlockingSource, CommandSource, CommandSourceConfig, DigestSource, Manifest, ManifestEntry,
    MemorySource,
    VerificationReport, VerificationResult, Verifier, VerifierConfig,
};
