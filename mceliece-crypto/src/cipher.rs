//! Encryption against a public key: `C = M·G1 + Z` with a fresh weight-t error `Z`
//! per block.

use crate::codec::{Ciphertext, bits_of, split_blocks};
use crate::errors::McElieceError;
use crate::gf2::{BitVector, vector_add, vector_matrix_mul};
use crate::keypair::helper::random_error_vector;
use crate::keypair::keys::PublicKey;

use log::debug;
use rand::Rng;
use rayon::prelude::*;

impl PublicKey {
    /// Encrypts one k-bit block with a freshly sampled error vector.
    pub fn encrypt_block(&self, block: &BitVector) -> Result<BitVector, McElieceError> {
        self.encrypt_block_with_rng(block, &mut rand::rng())
    }

    pub fn encrypt_block_with_rng<R: Rng + ?Sized>(
        &self,
        block: &BitVector,
        rng: &mut R,
    ) -> Result<BitVector, McElieceError> {
        if self.params.t > self.params.n {
            return Err(McElieceError::InvalidParameters(format!(
                "Error weight t ({}) cannot exceed n ({})",
                self.params.t, self.params.n
            )));
        }
        let z = random_error_vector(self.params.n, self.params.t, rng);
        self.encrypt_block_with_error(block, &z)
    }

    /// Computes `M·G1 + Z` for a caller-supplied error vector `Z`.
    pub fn encrypt_block_with_error(
        &self,
        block: &BitVector,
        error: &BitVector,
    ) -> Result<BitVector, McElieceError> {
        let k = self.params.k;
        if block.len() > k {
            return Err(McElieceError::InputTooLarge {
                len: block.len(),
                capacity: k,
            });
        }
        if block.len() != k {
            return Err(McElieceError::DimensionMismatch(format!(
                "Message block length ({}) must match parameter k ({})",
                block.len(),
                k
            )));
        }

        let codeword = vector_matrix_mul(block, &self.G1)?;
        vector_add(&codeword, error)
    }

    /// Encrypts arbitrary bytes, one block per k bits, in parallel.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Ciphertext, McElieceError> {
        let bits = bits_of(plaintext);
        let blocks = split_blocks(&bits, self.params.k)?;
        debug!("Encrypting {} bits in {} blocks", bits.len(), blocks.len());

        let encrypted: Vec<BitVector> = blocks
            .par_iter()
            .map(|block| self.encrypt_block(block))
            .collect::<Result<_, _>>()?;

        Ok(Ciphertext {
            bits: encrypted.concat(),
            original_bit_length: bits.len(),
        })
    }

    /// Sequential [`PublicKey::encrypt`] drawing all error vectors from `rng`.
    pub fn encrypt_with_rng<R: Rng + ?Sized>(
        &self,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Ciphertext, McElieceError> {
        let bits = bits_of(plaintext);
        let mut out = Vec::with_capacity(self.params.block_count(bits.len()) * self.params.n);
        for block in split_blocks(&bits, self.params.k)? {
            out.extend(self.encrypt_block_with_rng(&block, rng)?);
        }
        Ok(Ciphertext {
            bits: out,
            original_bit_length: bits.len(),
        })
    }

    pub fn encrypt_str(&self, plaintext: &str) -> Result<Ciphertext, McElieceError> {
        self.encrypt(plaintext.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf2::hamming_weight;
    use crate::keypair::keys::generate_keypair_with_rng;
    use crate::keypair::params::McElieceParams;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn public_key() -> PublicKey {
        let params = McElieceParams::try_with(24, 12, 2).unwrap();
        generate_keypair_with_rng(params, &mut StdRng::seed_from_u64(1))
            .unwrap()
            .0
    }

    #[test]
    fn test_ciphertext_differs_from_codeword_by_t() {
        let key = public_key();
        let block: BitVector = vec![1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 1, 0];
        let codeword = vector_matrix_mul(&block, &key.G1).unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        let c = key.encrypt_block_with_rng(&block, &mut rng).unwrap();
        assert_eq!(c.len(), 24);
        assert_eq!(hamming_weight(&vector_add(&c, &codeword).unwrap()), 2);
    }

    #[test]
    fn test_block_length_checks() {
        let key = public_key();
        assert!(matches!(
            key.encrypt_block(&vec![0; 13]),
            Err(McElieceError::InputTooLarge {
                len: 13,
                capacity: 12
            })
        ));
        assert!(matches!(
            key.encrypt_block(&vec![0; 11]),
            Err(McElieceError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_encrypt_lengths() {
        let key = public_key();
        // 5 bytes = 40 bits -> 4 blocks of 12
        let ciphertext = key.encrypt(b"hello").unwrap();
        assert_eq!(ciphertext.original_bit_length, 40);
        assert_eq!(ciphertext.bits.len(), 4 * 24);

        let mut rng = StdRng::seed_from_u64(3);
        let sequential = key.encrypt_with_rng(b"hello", &mut rng).unwrap();
        assert_eq!(sequential.bits.len(), ciphertext.bits.len());
    }

    #[test]
    fn test_empty_plaintext() {
        let key = public_key();
        let ciphertext = key.encrypt(b"").unwrap();
        assert!(ciphertext.bits.is_empty());
        assert_eq!(ciphertext.original_bit_length, 0);
    }

    #[test]
    fn test_same_plaintext_encrypts_differently() {
        let key = public_key();
        let mut rng = StdRng::seed_from_u64(4);
        let a = key.encrypt_with_rng(b"abc", &mut rng).unwrap();
        let b = key.encrypt_with_rng(b"abc", &mut rng).unwrap();
        assert_ne!(a.bits, b.bits);
    }
}
