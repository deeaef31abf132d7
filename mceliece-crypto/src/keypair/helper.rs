use crate::gf2::{BitMatrix, BitVector, hamming_weight, transpose};

use rand::Rng;
use rand::seq::index::sample;

/// Samples a length-`n` vector with exactly `t` ones at distinct uniform positions.
///
/// Callers guarantee `t <= n`.
pub fn random_error_vector<R: Rng + ?Sized>(n: usize, t: usize, rng: &mut R) -> BitVector {
    let mut z = vec![0; n];
    for position in sample(rng, n, t).into_iter() {
        z[position] = 1;
    }
    z
}

/// Whether every row and every column of `matrix` has Hamming weight exactly 1.
pub fn is_permutation_matrix(matrix: &BitMatrix) -> bool {
    let n = matrix.len();
    matrix.iter().all(|row| row.len() == n && hamming_weight(row) == 1)
        && transpose(matrix).iter().all(|col| hamming_weight(col) == 1)
}
