//! # bubblesum testkit
//!
//! Testing utilities for bubblesum.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with their published or cross-checked encodings
//! - **Generators**: Proptest strategies for digests, encodings and file names
//! - **Fixtures**: Temporary directories with files, digests and a manifest
//!
//! ## Golden Vectors
//!
//! ```rust
//! use bubblesum_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     assert_eq!(bubblesum_core::encode(&vector.input()), vector.encoded);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use bubblesum_testkit::generators::digest;
//!
//! proptest! {
//!     #[test]
//!     fn encoding_is_deterministic(d in digest()) {
//!         prop_assert_eq!(d.to_babble(), d.to_babble());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use bubblesum_testkit::fixtures::ManifestFixture;
//!
//! let mut fixture = ManifestFixture::new();
//! fixture.add_matching("release.tar", vec![0u8; 32]);
//! fixture.add_missing("gone.tar", vec![1u8; 32]);
//! let manifest_path = fixture.write_manifest();
//! assert!(manifest_path.exists());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::ManifestFixture;
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
