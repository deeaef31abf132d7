#[derive(thiserror::Error, Debug)]
pub enum McElieceError {
    /// Operands of a matrix or vector operation have incompatible shapes.
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    /// Gauss-Jordan elimination found a column without a pivot.
    #[error("Singular: matrix is not invertible over GF(2)")]
    Singular,
    /// No invertible scrambling matrix was found within the retry budget.
    #[error("Key generation failed: no invertible matrix after {attempts} attempts")]
    KeyGenerationFailed { attempts: usize },
    /// Syndrome search exhausted without finding a zero syndrome.
    #[error("Block {block} could not be decoded within the error weight bound")]
    DecodeUncorrectable { block: usize },
    #[error("Input of {len} bits exceeds block capacity of {capacity} bits")]
    InputTooLarge { len: usize, capacity: usize },
    #[error("MalformedCiphertext: {0}")]
    MalformedCiphertext(String),

    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),

    #[error("Decrypted data is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}

