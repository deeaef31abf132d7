//! Bounded exhaustive syndrome decoding.
//!
//! The search walks error patterns by increasing weight `w = 1..=t`, enumerating every
//! `C(n, w)` set of positions, and accepts the first pattern that zeroes the syndrome.
//! Cost is `O(C(n, t))` per word, so the search is refused outright once `t` exceeds the
//! configured weight limit.

use crate::errors::McElieceError;
use crate::gf2::{BitVector, is_zero, transpose};
use crate::linear_code::LinearCode;

use itertools::Itertools;
use log::{debug, warn};

/// How a received word was turned into a message estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// The syndrome was already zero.
    None,
    /// The listed positions were flipped to reach a codeword.
    Corrected { positions: Vec<usize> },
    /// No pattern of weight ≤ t zeroed the syndrome, or the search was skipped.
    Uncorrectable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWord {
    /// The first k bits of the (possibly corrected) word.
    pub message: BitVector,
    pub correction: Correction,
}

impl DecodedWord {
    pub fn is_corrected(&self) -> bool {
        !matches!(self.correction, Correction::Uncorrectable)
    }
}

impl LinearCode {
    /// Syndrome-decodes `received`, searching error patterns up to weight `t`.
    ///
    /// When `t > search_weight_limit` no search is attempted and a nonzero syndrome yields
    /// [`Correction::Uncorrectable`] with the uncorrected first k bits.
    pub fn decode(
        &self,
        received: &BitVector,
        t: usize,
        search_weight_limit: usize,
    ) -> Result<DecodedWord, McElieceError> {
        self.check_shape()?;
        let syndrome = self.syndrome(received)?;
        if is_zero(&syndrome) {
            return Ok(DecodedWord {
                message: received[..self.k].to_vec(),
                correction: Correction::None,
            });
        }

        if t > search_weight_limit {
            warn!(
                "Error weight {} exceeds search limit {}; returning uncorrected word",
                t, search_weight_limit
            );
            return Ok(self.uncorrected(received));
        }

        // Row j of H^T is the syndrome of a single error at position j. The syndrome is
        // linear, so the syndrome of `received + e` is `syndrome + sum of those rows`.
        let columns = transpose(&self.H);
        let mut candidate = vec![0u8; syndrome.len()];

        for weight in 1..=t.min(self.n) {
            match pattern_count(self.n, weight) {
                Some(count) => debug!("Searching {} error patterns of weight {}", count, weight),
                None => debug!("Searching error patterns of weight {}", weight),
            }
            for positions in (0..self.n).combinations(weight) {
                candidate.copy_from_slice(&syndrome);
                for &p in &positions {
                    for (s, &h) in candidate.iter_mut().zip(&columns[p]) {
                        *s ^= h;
                    }
                }
                if is_zero(&candidate) {
                    let mut corrected = received.clone();
                    for &p in &positions {
                        corrected[p] ^= 1;
                    }
                    corrected.truncate(self.k);
                    return Ok(DecodedWord {
                        message: corrected,
                        correction: Correction::Corrected { positions },
                    });
                }
            }
        }

        Ok(self.uncorrected(received))
    }

    fn uncorrected(&self, received: &BitVector) -> DecodedWord {
        DecodedWord {
            message: received[..self.k].to_vec(),
            correction: Correction::Uncorrectable,
        }
    }
}

/// `C(n, w)`, or `None` if computing it would overflow a `u128`.
fn pattern_count(n: usize, w: usize) -> Option<u128> {
    let w = w.min(n - w.min(n));
    (0..w as u128).try_fold(1u128, |acc, i| {
        acc.checked_mul(n as u128 - i).map(|product| product / (i + 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Systematic Hamming(7, 4) code, which corrects every single-bit error.
    fn hamming_7_4() -> LinearCode {
        LinearCode::from_redundancy(vec![
            vec![1, 1, 0],
            vec![1, 0, 1],
            vec![0, 1, 1],
            vec![1, 1, 1],
        ])
        .unwrap()
    }

    #[test]
    fn test_clean_word_skips_search() {
        let code = hamming_7_4();
        let codeword = code.encode(&vec![1, 0, 1, 1]).unwrap();

        let decoded = code.decode(&codeword, 1, 10).unwrap();
        assert_eq!(decoded.message, vec![1, 0, 1, 1]);
        assert_eq!(decoded.correction, Correction::None);
    }

    #[test]
    fn test_every_single_error_is_corrected() {
        let code = hamming_7_4();
        let message = vec![0, 1, 1, 0];
        let codeword = code.encode(&message).unwrap();

        for position in 0..7 {
            let mut received = codeword.clone();
            received[position] ^= 1;

            let decoded = code.decode(&received, 1, 10).unwrap();
            assert_eq!(decoded.message, message);
            assert_eq!(
                decoded.correction,
                Correction::Corrected {
                    positions: vec![position]
                }
            );
        }
    }

    #[test]
    fn test_search_disabled_above_limit() {
        let code = hamming_7_4();
        let mut received = code.encode(&vec![1, 1, 1, 1]).unwrap();
        received[0] ^= 1;

        let decoded = code.decode(&received, 3, 2).unwrap();
        assert_eq!(decoded.correction, Correction::Uncorrectable);
        assert_eq!(decoded.message, received[..4].to_vec());
        assert!(!decoded.is_corrected());
    }

    #[test]
    fn test_random_code_corrects_three_errors() {
        let mut rng = StdRng::seed_from_u64(2024);
        let code = LinearCode::generate(32, 64, &mut rng).unwrap();
        let message: BitVector = (0..32).map(|i| (i % 3 == 0) as u8).collect();
        let mut received = code.encode(&message).unwrap();
        for p in [5, 33, 60] {
            received[p] ^= 1;
        }

        let decoded = code.decode(&received, 3, 10).unwrap();
        assert!(decoded.is_corrected());
        assert_eq!(decoded.message, message);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let code = hamming_7_4();
        assert!(code.decode(&vec![1, 0, 1], 1, 10).is_err());
    }

    #[test]
    fn test_deserialized_code_with_bad_dimensions_is_error() {
        let mut value = serde_json::to_value(hamming_7_4()).unwrap();
        value["k"] = 9.into();
        let code: LinearCode = serde_json::from_value(value).unwrap();

        assert!(matches!(
            code.decode(&vec![0; 7], 1, 10),
            Err(McElieceError::DimensionMismatch(_))
        ));
        assert!(code.decode(&vec![0; 4], 1, 10).is_err());
    }

    #[test]
    fn test_pattern_count() {
        assert_eq!(pattern_count(7, 0), Some(1));
        assert_eq!(pattern_count(7, 1), Some(7));
        assert_eq!(pattern_count(64, 3), Some(41_664));
        assert_eq!(pattern_count(64, 61), Some(41_664));
        assert_eq!(pattern_count(100_000, 10), None);
    }
}
