//! Key transform: the private scrambling and permutation matrices, and the
//! public generator matrix `G1 = S·G·P` they disguise the code with.

use crate::errors::McElieceError;
use crate::gf2::{BitMatrix, identity_matrix, matrix_inverse, matrix_mul, random_matrix};

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

/// Samples random k×k matrices until one inverts, returning `(S, S⁻¹)`.
///
/// Each candidate's inverse is checked against `S·S⁻¹ = I_k` before acceptance.
///
/// # Errors
///
/// `KeyGenerationFailed` once `max_attempts` samples have all been singular. There is no
/// identity fallback: an unscrambled public key exposes the private code.
pub fn generate_invertible<R: Rng + ?Sized>(
    k: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(BitMatrix, BitMatrix), McElieceError> {
    let identity = identity_matrix(k);
    for attempt in 1..=max_attempts {
        let s = random_matrix(k, k, rng);
        let s_inv = match matrix_inverse(&s) {
            Ok(inv) => inv,
            Err(McElieceError::Singular) => continue,
            Err(e) => return Err(e),
        };
        if matrix_mul(&s, &s_inv)? == identity {
            debug!("Found invertible {}x{} matrix after {} attempts", k, k, attempt);
            return Ok((s, s_inv));
        }
    }

    warn!(
        "No invertible {}x{} matrix found in {} attempts",
        k, k, max_attempts
    );
    Err(McElieceError::KeyGenerationFailed {
        attempts: max_attempts,
    })
}

/// The n×n identity with its rows shuffled uniformly.
pub fn generate_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> BitMatrix {
    let mut p = identity_matrix(n);
    p.shuffle(rng);
    p
}

/// Computes `G1 = ((S·G) mod 2 · P) mod 2`.
pub fn derive_public_key(
    G: &BitMatrix,
    S: &BitMatrix,
    P: &BitMatrix,
) -> Result<BitMatrix, McElieceError> {
    let scrambled = matrix_mul(S, G)?;
    matrix_mul(&scrambled, P)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::helper::is_permutation_matrix;
    use crate::linear_code::LinearCode;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_scrambling_matrix_inverts() {
        let mut rng = StdRng::seed_from_u64(42);
        for k in [1, 2, 8, 32] {
            let (s, s_inv) = generate_invertible(k, 10_000, &mut rng).unwrap();
            assert_eq!(matrix_mul(&s, &s_inv).unwrap(), identity_matrix(k));
            assert_eq!(matrix_inverse(&s).unwrap(), s_inv);
        }
    }

    #[test]
    fn test_exhausted_budget_fails_loudly() {
        // A 1x1 matrix is invertible only when its single bit is set, so a budget of one
        // attempt fails for roughly half the seeds; find one that does.
        let failure = (0..64u64).find_map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_invertible(1, 1, &mut rng).err()
        });
        assert!(matches!(
            failure,
            Some(McElieceError::KeyGenerationFailed { attempts: 1 })
        ));
    }

    #[test]
    fn test_permutation_rows_and_columns_have_weight_one() {
        let mut rng = StdRng::seed_from_u64(5);
        for n in [1, 2, 16, 64] {
            let p = generate_permutation(n, &mut rng);
            assert_eq!(p.len(), n);
            assert!(is_permutation_matrix(&p));
        }
    }

    #[test]
    fn test_permutation_inverse_is_transpose() {
        let mut rng = StdRng::seed_from_u64(6);
        let p = generate_permutation(12, &mut rng);
        assert_eq!(matrix_inverse(&p).unwrap(), crate::gf2::transpose(&p));
    }

    #[test]
    fn test_derive_public_key_shape() {
        let mut rng = StdRng::seed_from_u64(8);
        let code = LinearCode::generate(8, 20, &mut rng).unwrap();
        let (s, _) = generate_invertible(8, 1000, &mut rng).unwrap();
        let p = generate_permutation(20, &mut rng);

        let g1 = derive_public_key(&code.G, &s, &p).unwrap();
        assert_eq!(g1.len(), 8);
        assert!(g1.iter().all(|row| row.len() == 20));
        assert_eq!(g1, matrix_mul(&matrix_mul(&s, &code.G).unwrap(), &p).unwrap());
    }

    #[test]
    fn test_derive_public_key_dimension_mismatch() {
        let s = identity_matrix(3);
        let g = vec![vec![1, 0, 1, 1], vec![0, 1, 1, 0]];
        assert!(matches!(
            derive_public_key(&g, &s, &identity_matrix(4)),
            Err(McElieceError::DimensionMismatch(_))
        ));
    }
}
