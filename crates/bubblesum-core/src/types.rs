//! Strong type definitions for digests and their encodings.
//!
//! Raw digests and Bubble Babble strings are newtypes so that an unchecked
//! string can never be compared against a computed encoding by accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::babble;
use crate::error::{CodecError, Result};

/// Raw digest bytes as produced by some hash function.
///
/// The length is whatever the producing hash emits; the empty digest is valid.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Digest(pub Vec<u8>);

impl Digest {
    /// Create a digest from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from a hex string.
    ///
    /// Surrounding whitespace is ignored. Odd-length input or non-hex
    /// characters are [`CodecError::MalformedInput`].
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())?;
        Ok(Self(bytes))
    }

    /// Bubble Babble encoding of this digest.
    pub fn to_babble(&self) -> EncodedString {
        EncodedString(babble::encode(&self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        match hex.get(..16) {
            Some(prefix) if hex.len() > 16 => write!(f, "Digest({}..)", prefix),
            _ => write!(f, "Digest({})", hex),
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Digest {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// A Bubble Babble string known to decode cleanly.
///
/// Construction always goes through [`babble::decode`], so holding an
/// `EncodedString` means the delimiters, structure and embedded checksum
/// have been validated.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedString(String);

impl EncodedString {
    /// Validate and wrap a Bubble Babble string.
    pub fn parse(s: &str) -> Result<Self> {
        babble::decode(s)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back into the digest bytes.
    pub fn to_digest(&self) -> Result<Digest> {
        babble::decode(&self.0).map(Digest)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for EncodedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedString({})", self.0)
    }
}

impl fmt::Display for EncodedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EncodedString {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EncodedString {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self> {
        babble::decode(&s)?;
        Ok(Self(s))
    }
}

impl From<EncodedString> for String {
    fn from(s: EncodedString) -> Self {
        s.into_string()
    }
}

impl AsRef<str> for EncodedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EncodedString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EncodedString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
