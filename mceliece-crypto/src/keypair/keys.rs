use crate::codec::{Ciphertext, data_of};
use crate::errors::McElieceError;
use crate::gf2::helper::packed_matrix;
use crate::gf2::{BitMatrix, BitVector, matrix_inverse, vector_matrix_mul};
use crate::keypair::helper::is_permutation_matrix;
use crate::keypair::params::{DecodePolicy, McElieceParams};
use crate::keypair::transform::{derive_public_key, generate_invertible, generate_permutation};
use crate::linear_code::LinearCode;

use log::{debug, warn};
use rand::Rng;
use rayon::prelude::*;

use serde::{Deserialize, Serialize};

/// The public half `(G1, t)`; `t` travels inside `params`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub params: McElieceParams,
    /// `S·G·P`, k×n.
    #[serde(with = "packed_matrix")]
    pub G1: BitMatrix,
}

/// The private half `(S, G, P, H)`, with `S⁻¹` and `P⁻¹` computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PrivateKeyParts", into = "PrivateKeyParts")]
pub struct PrivateKey {
    pub params: McElieceParams,
    /// Holds both `G` and `H`.
    pub code: LinearCode,
    pub S: BitMatrix,
    pub P: BitMatrix,
    S_inv: BitMatrix,
    P_inv: BitMatrix,
}

/// Serialized form of [`PrivateKey`]; inverses are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct PrivateKeyParts {
    params: McElieceParams,
    code: LinearCode,
    #[serde(with = "packed_matrix")]
    S: BitMatrix,
    #[serde(with = "packed_matrix")]
    P: BitMatrix,
}

impl TryFrom<PrivateKeyParts> for PrivateKey {
    type Error = McElieceError;

    fn try_from(parts: PrivateKeyParts) -> Result<Self, Self::Error> {
        PrivateKey::from_parts(parts.params, parts.code, parts.S, parts.P)
    }
}

impl From<PrivateKey> for PrivateKeyParts {
    fn from(key: PrivateKey) -> Self {
        Self {
            params: key.params,
            code: key.code,
            S: key.S,
            P: key.P,
        }
    }
}

/// Generates a fresh key pair from `(n, k, t)` and the tunables in `params`.
pub fn generate_keypair(params: McElieceParams) -> Result<(PublicKey, PrivateKey), McElieceError> {
    generate_keypair_with_rng(params, &mut rand::rng())
}

pub fn generate_keypair_with_rng<R: Rng + ?Sized>(
    params: McElieceParams,
    rng: &mut R,
) -> Result<(PublicKey, PrivateKey), McElieceError> {
    let private_key = PrivateKey::generate_with_rng(params, rng)?;
    let public_key = private_key.get_public_key()?;
    Ok((public_key, private_key))
}

/// Outcome of decrypting one ciphertext block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDecryption {
    pub index: usize,
    /// The recovered k-bit block, or the best-effort guess when `corrected` is false.
    pub message: BitVector,
    pub corrected: bool,
}

/// Result of decrypting a whole ciphertext.
///
/// Blocks are decrypted independently: an uncorrectable block is listed in
/// `failed_blocks` and contributes its best-effort bits, leaving its neighbours intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decryption {
    pub plaintext: Vec<u8>,
    pub failed_blocks: Vec<usize>,
    pub policy: DecodePolicy,
}

impl Decryption {
    pub fn is_complete(&self) -> bool {
        self.failed_blocks.is_empty()
    }

    /// Returns the plaintext, or `DecodeUncorrectable` for the first failed block under
    /// [`DecodePolicy::Strict`].
    pub fn into_plaintext(self) -> Result<Vec<u8>, McElieceError> {
        match (self.policy, self.failed_blocks.first()) {
            (DecodePolicy::Strict, Some(&block)) => {
                Err(McElieceError::DecodeUncorrectable { block })
            }
            _ => Ok(self.plaintext),
        }
    }

    pub fn into_string(self) -> Result<String, McElieceError> {
        Ok(String::from_utf8(self.into_plaintext()?)?)
    }
}

impl PrivateKey {
    /// Generates a private key with the thread-local RNG.
    pub fn try_with(params: McElieceParams) -> Result<Self, McElieceError> {
        Self::generate_with_rng(params, &mut rand::rng())
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        params: McElieceParams,
        rng: &mut R,
    ) -> Result<Self, McElieceError> {
        params.validate()?;
        if !params.search_enabled() {
            warn!(
                "t = {} exceeds the search weight limit {}; corrupted blocks will not be corrected",
                params.t, params.search_weight_limit
            );
        }

        // 1) systematic code G = [I_k | A], H = [A^T | I_{n-k}]
        let code = LinearCode::generate(params.k, params.n, rng)?;

        // 2) scrambling matrix S and its inverse
        let (S, S_inv) = generate_invertible(params.k, params.max_keygen_attempts, rng)?;

        // 3) permutation matrix P
        let P = generate_permutation(params.n, rng);
        let P_inv = matrix_inverse(&P)?;

        debug!(
            "Generated key pair with n = {}, k = {}, t = {}",
            params.n, params.k, params.t
        );

        Ok(Self {
            params,
            code,
            S,
            P,
            S_inv,
            P_inv,
        })
    }

    /// Assembles a private key from its parts, checking shapes and inverting `S` and `P`.
    pub fn from_parts(
        params: McElieceParams,
        code: LinearCode,
        S: BitMatrix,
        P: BitMatrix,
    ) -> Result<Self, McElieceError> {
        params.validate()?;
        if code.n != params.n || code.k != params.k {
            return Err(McElieceError::InvalidParameters(format!(
                "Code is [{}, {}] but parameters say [{}, {}]",
                code.n, code.k, params.n, params.k
            )));
        }
        code.check_shape()?;
        if S.len() != params.k {
            return Err(McElieceError::DimensionMismatch(format!(
                "Scrambling matrix must be {}x{}",
                params.k, params.k
            )));
        }
        if P.len() != params.n || !is_permutation_matrix(&P) {
            return Err(McElieceError::InvalidParameters(format!(
                "P is not a {}x{} permutation matrix",
                params.n, params.n
            )));
        }

        let S_inv = matrix_inverse(&S)?;
        let P_inv = matrix_inverse(&P)?;
        Ok(Self {
            params,
            code,
            S,
            P,
            S_inv,
            P_inv,
        })
    }

    pub fn get_public_key(&self) -> Result<PublicKey, McElieceError> {
        Ok(PublicKey {
            params: self.params,
            G1: derive_public_key(&self.code.G, &self.S, &self.P)?,
        })
    }

    /// Decrypts one n-bit block, applying the key's [`DecodePolicy`].
    pub fn decrypt_block(&self, block: &BitVector) -> Result<BitVector, McElieceError> {
        let decrypted = self.decrypt_indexed(0, block)?;
        self.apply_policy(decrypted)
    }

    /// Recovers one block: `C1 = C·P⁻¹`, syndrome-decode C1, then `M = M1·S⁻¹`.
    pub fn decrypt_indexed(
        &self,
        index: usize,
        block: &BitVector,
    ) -> Result<BlockDecryption, McElieceError> {
        if block.len() != self.params.n {
            return Err(McElieceError::DimensionMismatch(format!(
                "Ciphertext block length ({}) must match parameter n ({})",
                block.len(),
                self.params.n
            )));
        }

        let unpermuted = vector_matrix_mul(block, &self.P_inv)?;
        let decoded = self.code.decode(
            &unpermuted,
            self.params.t,
            self.params.search_weight_limit,
        )?;
        let message = vector_matrix_mul(&decoded.message, &self.S_inv)?;

        Ok(BlockDecryption {
            index,
            message,
            corrected: decoded.is_corrected(),
        })
    }

    fn apply_policy(&self, decrypted: BlockDecryption) -> Result<BitVector, McElieceError> {
        if decrypted.corrected {
            return Ok(decrypted.message);
        }
        match self.params.decode_policy {
            DecodePolicy::BestEffort => {
                warn!(
                    "Block {} is uncorrectable; using the uncorrected guess",
                    decrypted.index
                );
                Ok(decrypted.message)
            }
            DecodePolicy::Strict => Err(McElieceError::DecodeUncorrectable {
                block: decrypted.index,
            }),
        }
    }

    /// Decrypts every block of `ciphertext` in parallel and truncates to the original length.
    ///
    /// # Errors
    ///
    /// `MalformedCiphertext` when the bit count is not a multiple of n or the recorded length
    /// exceeds what the blocks can hold. Per-block decode failures are reported in the
    /// returned [`Decryption`] instead.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Decryption, McElieceError> {
        let n = self.params.n;
        let k = self.params.k;
        if ciphertext.bits.len() % n != 0 {
            return Err(McElieceError::MalformedCiphertext(format!(
                "{} ciphertext bits is not a multiple of n = {}",
                ciphertext.bits.len(),
                n
            )));
        }
        let block_count = ciphertext.bits.len() / n;
        if ciphertext.original_bit_length > block_count * k {
            return Err(McElieceError::MalformedCiphertext(format!(
                "Original length {} exceeds the {} bits carried by {} blocks",
                ciphertext.original_bit_length,
                block_count * k,
                block_count
            )));
        }

        let blocks: Vec<BlockDecryption> = ciphertext
            .bits
            .par_chunks(n)
            .enumerate()
            .map(|(index, chunk)| self.decrypt_indexed(index, &chunk.to_vec()))
            .collect::<Result<_, _>>()?;

        let mut failed_blocks = Vec::new();
        let mut bits: BitVector = Vec::with_capacity(block_count * k);
        for block in blocks {
            if !block.corrected {
                warn!("Block {} could not be corrected", block.index);
                failed_blocks.push(block.index);
            }
            bits.extend(block.message);
        }
        bits.truncate(ciphertext.original_bit_length);

        Ok(Decryption {
            plaintext: data_of(&bits),
            failed_blocks,
            policy: self.params.decode_policy,
        })
    }
}
