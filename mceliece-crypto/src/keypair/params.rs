use crate::errors::McElieceError;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CODE_LENGTH: usize = 64;
pub const DEFAULT_MESSAGE_LENGTH: usize = 32;
pub const DEFAULT_ERROR_WEIGHT: usize = 3;
pub const DEFAULT_MAX_KEYGEN_ATTEMPTS: usize = 100_000;
/// Above this error weight the exhaustive syndrome search is not attempted.
pub const DEFAULT_SEARCH_WEIGHT_LIMIT: usize = 10;

/// What decryption does with a block whose syndrome search found nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Use the uncorrected first k bits and carry on.
    BestEffort,
    /// Report `DecodeUncorrectable` for the block.
    #[default]
    Strict,
}

/// Parameters of a key pair.
///
/// Decoding cost grows as `C(n, t)` per block, so raising `t` by even one or two
/// multiplies decryption latency. `search_weight_limit` caps what will be attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct McElieceParams {
    /// Codeword length n.
    pub n: usize,
    /// Message block length k.
    pub k: usize,
    /// Number of errors injected per block.
    pub t: usize,
    /// Retry budget for sampling an invertible scrambling matrix.
    #[serde(default = "default_max_keygen_attempts")]
    pub max_keygen_attempts: usize,
    #[serde(default = "default_search_weight_limit")]
    pub search_weight_limit: usize,
    #[serde(default)]
    pub decode_policy: DecodePolicy,
}

fn default_max_keygen_attempts() -> usize {
    DEFAULT_MAX_KEYGEN_ATTEMPTS
}

fn default_search_weight_limit() -> usize {
    DEFAULT_SEARCH_WEIGHT_LIMIT
}

impl Default for McElieceParams {
    fn default() -> Self {
        Self {
            n: DEFAULT_CODE_LENGTH,
            k: DEFAULT_MESSAGE_LENGTH,
            t: DEFAULT_ERROR_WEIGHT,
            max_keygen_attempts: DEFAULT_MAX_KEYGEN_ATTEMPTS,
            search_weight_limit: DEFAULT_SEARCH_WEIGHT_LIMIT,
            decode_policy: DecodePolicy::default(),
        }
    }
}

impl McElieceParams {
    /// Creates validated parameters with default tunables.
    pub fn try_with(n: usize, k: usize, t: usize) -> Result<Self, McElieceError> {
        let params = Self {
            n,
            k,
            t,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_max_keygen_attempts(mut self, attempts: usize) -> Self {
        self.max_keygen_attempts = attempts;
        self
    }

    pub fn with_search_weight_limit(mut self, limit: usize) -> Self {
        self.search_weight_limit = limit;
        self
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Checks the invariants `0 < k < n`, `t <= n` and a non-zero retry budget.
    ///
    /// Parameters read from outside the process must pass through here.
    pub fn validate(&self) -> Result<(), McElieceError> {
        if self.k == 0 {
            return Err(McElieceError::InvalidParameters(
                "Message length k must be > 0".to_string(),
            ));
        }
        if self.n <= self.k {
            return Err(McElieceError::InvalidParameters(format!(
                "Code length n ({}) must be greater than k ({})",
                self.n, self.k
            )));
        }
        if self.t > self.n {
            return Err(McElieceError::InvalidParameters(format!(
                "Error weight t ({}) cannot exceed n ({})",
                self.t, self.n
            )));
        }
        if self.max_keygen_attempts == 0 {
            return Err(McElieceError::InvalidParameters(
                "max_keygen_attempts must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a nonzero syndrome will trigger the exhaustive search.
    pub fn search_enabled(&self) -> bool {
        self.t <= self.search_weight_limit
    }

    /// Number of k-bit blocks needed for `bit_len` bits of plaintext.
    pub fn block_count(&self, bit_len: usize) -> usize {
        bit_len.div_ceil(self.k)
    }
}
