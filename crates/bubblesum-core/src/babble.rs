//! Bubble Babble encoding.
//!
//! Implements the Bubble Babble binary data encoding (Antti Huima), the same
//! scheme used by `ssh-keygen -B`:
//! - Input is consumed two bytes at a time
//! - Each pair becomes a `vowel consonant vowel consonant - consonant` group
//! - A running checksum perturbs the vowels of every group
//! - The final group carries either an odd trailing byte or the checksum alone
//! - The whole string is wrapped in `x` delimiters
//!
//! The alphabets and checksum arithmetic must match the published scheme
//! exactly, otherwise encodings stop being comparable with other tools.

use crate::error::{CodecError, Result};

/// The six vowels, indexed by checksum-adjusted 2-bit values.
const VOWELS: &[u8; 6] = b"aeiouy";

/// The sixteen data consonants plus `x` (index 16), which only appears
/// in the checksum-only group.
const CONSONANTS: &[u8; 17] = b"bcdfghklmnprstvzx";

/// Start and end delimiter.
const DELIMITER: u8 = b'x';

/// Separator between the two consonants encoding the second byte of a pair.
const SEPARATOR: u8 = b'-';

/// Index of `x` in [`CONSONANTS`].
const CHECKSUM_MARKER: usize = 16;

/// Initial checksum value.
const CHECKSUM_SEED: usize = 1;

/// Checksum values live in `0..36`, so `seed % 6` and `seed / 6` are both
/// valid vowel indices.
const CHECKSUM_MODULUS: usize = 36;

/// Characters per full group (`vcvc-c`).
const GROUP_LEN: usize = 6;

/// Length of the encoding of `n` input bytes.
pub const fn encoded_len(n: usize) -> usize {
    (n / 2) * GROUP_LEN + 5
}

/// Encode bytes as a Bubble Babble string.
///
/// Never fails; the empty input encodes to `"xexax"`.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(data.len()));
    let mut seed = CHECKSUM_SEED;

    out.push(DELIMITER as char);

    let mut pairs = data.chunks_exact(2);
    for pair in &mut pairs {
        let (b1, b2) = (pair[0], pair[1]);
        push_byte(&mut out, b1, seed);
        out.push(consonant(usize::from(b2 >> 4)));
        out.push(SEPARATOR as char);
        out.push(consonant(usize::from(b2 & 0x0f)));
        seed = next_seed(seed, b1, b2);
    }

    match pairs.remainder() {
        [last] => push_byte(&mut out, *last, seed),
        _ => {
            // Even length: close with the checksum-only group
            out.push(vowel(seed % 6));
            out.push(consonant(CHECKSUM_MARKER));
            out.push(vowel(seed / 6));
        }
    }

    out.push(DELIMITER as char);
    out
}

/// Decode a Bubble Babble string back into bytes.
///
/// Structural problems (wrong length, missing delimiters, characters outside
/// the alphabets, a missing `-`) are [`CodecError::MalformedInput`]. Vowels
/// that disagree with the replayed checksum are
/// [`CodecError::ChecksumMismatch`].
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    let len = bytes.len();

    if len % GROUP_LEN != 5 {
        return Err(CodecError::MalformedInput(format!(
            "invalid length {} (expected 6n + 5)",
            len
        )));
    }
    if bytes[0] != DELIMITER || bytes[len - 1] != DELIMITER {
        return Err(CodecError::MalformedInput(
            "missing 'x' delimiters".into(),
        ));
    }

    let body = &bytes[1..len - 1];
    let (groups, tail) = body.split_at(body.len() - 3);

    let mut out = Vec::with_capacity(groups.len() / GROUP_LEN * 2 + 1);
    let mut seed = CHECKSUM_SEED;

    for (index, group) in groups.chunks_exact(GROUP_LEN).enumerate() {
        let offset = 1 + index * GROUP_LEN;

        let b1 = decode_byte(&group[..3], seed, offset)?;

        if group[4] != SEPARATOR {
            return Err(CodecError::MalformedInput(format!(
                "expected '-' at offset {}",
                offset + 4
            )));
        }

        let high = data_consonant_index(group[3], offset + 3)?;
        let low = data_consonant_index(group[5], offset + 5)?;
        let b2 = ((high << 4) | low) as u8;

        out.push(b1);
        out.push(b2);
        seed = next_seed(seed, b1, b2);
    }

    let offset = len - 4;
    if tail[1] == DELIMITER {
        let first = vowel_index(tail[0], offset)?;
        let last = vowel_index(tail[2], offset + 2)?;
        if first != seed % 6 || last != seed / 6 {
            return Err(CodecError::ChecksumMismatch { offset });
        }
    } else {
        out.push(decode_byte(tail, seed, offset)?);
    }

    Ok(out)
}

/// Emit the `vowel consonant vowel` triple for a single byte.
fn push_byte(out: &mut String, byte: u8, seed: usize) {
    let byte = usize::from(byte);
    out.push(vowel(((byte >> 6 & 3) + seed) % 6));
    out.push(consonant(byte >> 2 & 15));
    out.push(vowel(((byte & 3) + seed / 6) % 6));
}

/// Invert [`push_byte`], checking both vowels against the checksum.
fn decode_byte(triple: &[u8], seed: usize, offset: usize) -> Result<u8> {
    let first = vowel_index(triple[0], offset)?;
    let middle = data_consonant_index(triple[1], offset + 1)?;
    let last = vowel_index(triple[2], offset + 2)?;

    // Each vowel carries 2 bits shifted by the checksum; only 4 of the 6
    // rotations are reachable from real data.
    let high = (first + 6 - seed % 6) % 6;
    let low = (last + 6 - seed / 6) % 6;
    if high > 3 || low > 3 {
        return Err(CodecError::ChecksumMismatch { offset });
    }

    Ok(((high << 6) | (middle << 2) | low) as u8)
}

fn next_seed(seed: usize, b1: u8, b2: u8) -> usize {
    (seed * 5 + usize::from(b1) * 7 + usize::from(b2)) % CHECKSUM_MODULUS
}

fn vowel(index: usize) -> char {
    VOWELS[index] as char
}

fn consonant(index: usize) -> char {
    CONSONANTS[index] as char
}

fn vowel_index(c: u8, offset: usize) -> Result<usize> {
    VOWELS.iter().position(|&v| v == c).ok_or_else(|| {
        CodecError::MalformedInput(format!(
            "expected vowel at offset {}, found {:?}",
            offset, c as char
        ))
    })
}

/// Consonant index for a data position; `x` is only legal in the
/// checksum-only group.
fn data_consonant_index(c: u8, offset: usize) -> Result<usize> {
    match CONSONANTS.iter().position(|&k| k == c) {
        Some(index) if index < CHECKSUM_MARKER => Ok(index),
        _ => Err(CodecError::MalformedInput(format!(
            "expected consonant at offset {}, found {:?}",
            offset, c as char
        ))),
    }
}
