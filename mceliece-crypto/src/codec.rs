//! Conversions between bytes, bit streams and fixed-width blocks, plus the persisted
//! ciphertext text format.

use crate::errors::McElieceError;
use crate::gf2::{Bit, BitVector};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Expands each byte into 8 bits, most significant bit first.
///
/// # Example
///
/// ```
/// # use mceliece_crypto::codec::bits_of;
/// assert_eq!(bits_of(b"H"), vec![0, 1, 0, 0, 1, 0, 0, 0]);
/// ```
pub fn bits_of(data: &[u8]) -> BitVector {
    data.iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .collect()
}

/// Regroups bits into bytes, MSB first. A trailing group shorter than 8 bits is dropped.
///
/// # Example
///
/// ```
/// # use mceliece_crypto::codec::data_of;
/// assert_eq!(data_of(&[0, 1, 0, 0, 1, 0, 0, 0, 1, 1]), b"H".to_vec());
/// ```
pub fn data_of(bits: &[Bit]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | (bit & 1)))
        .collect()
}

/// Splits `bits` into windows of length `k`, zero-padding the last one on the right.
pub fn split_blocks(bits: &[Bit], k: usize) -> Result<Vec<BitVector>, McElieceError> {
    if k == 0 {
        return Err(McElieceError::InvalidParameters(
            "Block size must be > 0".to_string(),
        ));
    }
    Ok(bits
        .chunks(k)
        .map(|chunk| {
            let mut block = chunk.to_vec();
            block.resize(k, 0);
            block
        })
        .collect())
}

/// A ciphertext bit stream together with the unpadded plaintext bit length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    pub bits: BitVector,
    pub original_bit_length: usize,
}

impl Ciphertext {
    /// Number of n-bit blocks, or `None` if the stream is not block aligned.
    pub fn block_count(&self, n: usize) -> Option<usize> {
        (n != 0 && self.bits.len() % n == 0).then(|| self.bits.len() / n)
    }

    /// Renders the persisted form: the bit length on one line, then the bits as `0`/`1`.
    pub fn to_persisted(&self) -> String {
        self.to_string()
    }

    /// Parses the persisted form written by [`Ciphertext::to_persisted`].
    ///
    /// # Errors
    ///
    /// `MalformedCiphertext` for a missing or non-decimal length line or any bit character
    /// outside `{'0', '1'}`.
    pub fn from_persisted(text: &str) -> Result<Self, McElieceError> {
        let mut lines = text.lines();
        let length_line = lines
            .next()
            .ok_or_else(|| McElieceError::MalformedCiphertext("empty input".to_string()))?;
        let original_bit_length = length_line.trim().parse::<usize>().map_err(|e| {
            McElieceError::MalformedCiphertext(format!(
                "invalid bit length {:?}: {}",
                length_line.trim(),
                e
            ))
        })?;

        let body = lines.next().unwrap_or("").trim();
        if let Some(extra) = lines.find(|line| !line.trim().is_empty()) {
            return Err(McElieceError::MalformedCiphertext(format!(
                "unexpected trailing line {:?}",
                extra
            )));
        }

        let bits = body
            .chars()
            .enumerate()
            .map(|(i, c)| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(McElieceError::MalformedCiphertext(format!(
                    "invalid character {:?} at position {}",
                    other, i
                ))),
            })
            .collect::<Result<BitVector, _>>()?;

        Ok(Self {
            bits,
            original_bit_length,
        })
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.original_bit_length)?;
        for &bit in &self.bits {
            f.write_str(if bit & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Ciphertext {
    type Err = McElieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_persisted(s)
    }
}
