//! Proptest generators for property-based testing.

use proptest::prelude::*;

use bubblesum_core::{Digest, EncodedString};

/// Common digest sizes: MD5, SHA-1, SHA-256, SHA-384, SHA-512.
pub const DIGEST_SIZES: [usize; 5] = [16, 20, 32, 48, 64];

/// Generate arbitrary bytes up to `max_len`.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a digest of one of the common sizes.
pub fn digest() -> impl Strategy<Value = Digest> {
    prop::sample::select(DIGEST_SIZES.to_vec())
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
        .prop_map(Digest::new)
}

/// Generate a SHA-256 sized digest.
pub fn sha256_digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(|bytes| Digest::new(bytes.to_vec()))
}

/// Generate a well-formed encoding of arbitrary bytes.
pub fn encoded_string() -> impl Strategy<Value = EncodedString> {
    payload(64).prop_map(|bytes| Digest::new(bytes).to_babble())
}

/// Generate a manifest-safe file name: no whitespace, no leading `*`.
pub fn filename() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_][A-Za-z0-9_.-]{0,23}"
}
