//! # bubblesum core
//!
//! Pure primitives for bubblesum: the Bubble Babble codec and the digest
//! values it operates on.
//!
//! This crate contains no I/O and computes no hashes. Digest bytes are an
//! opaque input supplied by whoever calls it.
//!
//! ## Key Types
//!
//! - [`Digest`] - Raw digest bytes, with a hex boundary
//! - [`EncodedString`] - A validated Bubble Babble string
//! - [`CodecError`] - Malformed input or checksum mismatch
//!
//! ## Encoding
//!
//! ```rust
//! use bubblesum_core::{decode, encode};
//!
//! let encoded = encode(b"1234567890");
//! assert_eq!(encoded, "xesef-disof-gytuf-katof-movif-baxux");
//! assert_eq!(decode(&encoded).unwrap(), b"1234567890");
//! ```

pub mod babble;
pub mod error;
pub mod types;

pub use babble::{decode, encode, encoded_len};
pub use error::{CodecError, Result};
pub use types::{Digest, EncodedString};
