//! # Linear Code Module
//!
//! Systematic binary linear codes `G = [I_k | A]` with parity-check matrix
//! `H = [A^T | I_{n-k}]`, and the bounded syndrome decoder that corrects them.

pub mod decoder;

use crate::errors::McElieceError;
use crate::gf2::helper::packed_matrix;
use crate::gf2::matrix_ops::concat_columns;
use crate::gf2::{BitMatrix, BitVector, identity_matrix, random_matrix, transpose, vector_matrix_mul};

use rand::Rng;

use serde::{Deserialize, Serialize};

pub use decoder::{Correction, DecodedWord};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinearCode {
    /// Codeword length.
    pub n: usize,
    /// Message length.
    pub k: usize,
    /// Generator matrix, k×n.
    #[serde(with = "packed_matrix")]
    pub G: BitMatrix,
    /// Parity-check matrix, (n−k)×n.
    #[serde(with = "packed_matrix")]
    pub H: BitMatrix,
}

impl LinearCode {
    /// Builds a random systematic code of message length `k` and codeword length `n`.
    ///
    /// `G·H^T = A + A = 0` holds by construction, so no sample is ever rejected.
    pub fn generate<R: Rng + ?Sized>(k: usize, n: usize, rng: &mut R) -> Result<Self, McElieceError> {
        if k == 0 || k >= n {
            return Err(McElieceError::InvalidParameters(format!(
                "Code needs 0 < k < n, got k = {}, n = {}",
                k, n
            )));
        }
        Self::from_redundancy(random_matrix(k, n - k, rng))
    }

    /// Builds the code whose generator matrix is `[I_k | A]` for the given k×(n−k) block `A`.
    pub fn from_redundancy(A: BitMatrix) -> Result<Self, McElieceError> {
        let k = A.len();
        let r = A.first().map_or(0, |row| row.len());
        if k == 0 || r == 0 {
            return Err(McElieceError::InvalidParameters(
                "Redundancy block must be non-empty".into(),
            ));
        }

        let G = concat_columns(&identity_matrix(k), &A)?;
        let H = concat_columns(&transpose(&A), &identity_matrix(r))?;

        Ok(Self { n: k + r, k, G, H })
    }

    /// Checks that `G` is k×n and `H` is (n−k)×n.
    pub fn check_shape(&self) -> Result<(), McElieceError> {
        let rectangular = |m: &BitMatrix, rows: usize| {
            m.len() == rows && m.iter().all(|row| row.len() == self.n)
        };
        if self.k >= self.n || !rectangular(&self.G, self.k) || !rectangular(&self.H, self.n - self.k) {
            return Err(McElieceError::DimensionMismatch(format!(
                "Code matrices do not match [{}, {}]",
                self.n, self.k
            )));
        }
        Ok(())
    }

    /// Maps a k-bit message to its n-bit codeword `m·G`.
    pub fn encode(&self, message: &BitVector) -> Result<BitVector, McElieceError> {
        vector_matrix_mul(message, &self.G)
    }

    /// Computes `received · H^T`, which is zero exactly for codewords.
    pub fn syndrome(&self, received: &BitVector) -> Result<BitVector, McElieceError> {
        if received.len() != self.n {
            return Err(McElieceError::DimensionMismatch(format!(
                "Received word length ({}) must match code length ({})",
                received.len(),
                self.n
            )));
        }
        vector_matrix_mul(received, &transpose(&self.H))
    }
}
