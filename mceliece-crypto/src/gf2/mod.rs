
//! # GF(2) Module
//!
//! Bit vectors and bit matrices over the two-element field, where addition is
//! exclusive-or and multiplication is logical AND. Every entry is stored as a
//! `u8` holding either `0` or `1`.

pub mod helper;
pub mod matrix_ops;

/// A single element of GF(2).
pub type Bit = u8;
/// Represents a row vector of bits using a `Vec<u8>`.
pub type BitVector = Vec<Bit>;
/// Represents a bit matrix as a list of rows.
pub type BitMatrix = Vec<Vec<Bit>>;

pub use helper::{pack_bits, random_matrix, unpack_bits};
pub use matrix_ops::{
    hamming_weight, identity_matrix, is_zero, matrix_add, matrix_inverse, matrix_mul,
    transpose, vector_add, vector_matrix_mul,
};
