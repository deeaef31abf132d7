#![allow(non_snake_case)]

//! # McEliece Crypto
//!
//! A code-based public-key cryptosystem over GF(2). A random systematic linear
//! code is disguised as `G1 = S·G·P`; plaintext blocks are encrypted as
//! `M·G1 + Z` with a fresh weight-t error `Z`, and decrypted by undoing `P`,
//! syndrome decoding, and undoing `S`.
//!
//! The decoder is a bounded brute-force search, not an algebraic Goppa decoder,
//! so this crate is suited to experimentation with small parameters only.
//!
//! ```
//! use mceliece_crypto::keypair::{McElieceParams, generate_keypair};
//!
//! let params = McElieceParams::try_with(64, 32, 3).unwrap();
//! let (public_key, private_key) = generate_keypair(params).unwrap();
//!
//! let ciphertext = public_key.encrypt(b"Hi").unwrap();
//! let plaintext = private_key.decrypt(&ciphertext).unwrap().into_plaintext().unwrap();
//! assert_eq!(plaintext, b"Hi");
//! ```

pub mod cipher;
pub mod codec;
pub mod errors;
pub mod gf2;
pub mod keypair;
pub mod linear_code;

pub use codec::Ciphertext;
pub use errors::McElieceError;
pub use keypair::{DecodePolicy, McElieceParams, PrivateKey, PublicKey, generate_keypair};
