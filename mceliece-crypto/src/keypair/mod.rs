pub mod helper;
pub mod keys;
pub mod params;
pub mod transform;

pub use keys::{Decryption, PrivateKey, PublicKey, generate_keypair, generate_keypair_with_rng};
pub use params::{DecodePolicy, McElieceParams};
