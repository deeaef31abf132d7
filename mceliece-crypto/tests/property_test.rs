use mceliece_crypto::gf2::{BitVector, identity_matrix, is_zero, matrix_inverse, matrix_mul, transpose};
use mceliece_crypto::keypair::helper::is_permutation_matrix;
use mceliece_crypto::keypair::transform::{generate_invertible, generate_permutation};
use mceliece_crypto::keypair::{McElieceParams, PrivateKey, PublicKey, generate_keypair_with_rng};
use mceliece_crypto::linear_code::LinearCode;

use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::rngs::StdRng;

use std::sync::OnceLock;

fn shared_keypair() -> &'static (PublicKey, PrivateKey) {
    static KEYS: OnceLock<(PublicKey, PrivateKey)> = OnceLock::new();
    KEYS.get_or_init(|| {
        let params = McElieceParams::try_with(64, 32, 3).unwrap();
        generate_keypair_with_rng(params, &mut StdRng::seed_from_u64(7)).unwrap()
    })
}

fn code_shape(k: u8, r: u8) -> (usize, usize) {
    let k = 1 + (k as usize % 24);
    let n = k + 1 + (r as usize % 24);
    (k, n)
}

#[quickcheck]
fn prop_generator_orthogonal_to_parity(seed: u64, k: u8, r: u8) -> bool {
    let (k, n) = code_shape(k, r);
    let code = LinearCode::generate(k, n, &mut StdRng::seed_from_u64(seed)).unwrap();
    matrix_mul(&code.G, &transpose(&code.H))
        .unwrap()
        .iter()
        .all(|row| is_zero(row))
}

#[quickcheck]
fn prop_scrambler_times_inverse_is_identity(seed: u64, k: u8) -> bool {
    let k = 1 + (k as usize % 32);
    let (s, s_inv) = generate_invertible(k, 10_000, &mut StdRng::seed_from_u64(seed)).unwrap();
    matrix_mul(&s, &s_inv).unwrap() == identity_matrix(k)
        && matrix_mul(&s, &matrix_inverse(&s).unwrap()).unwrap() == identity_matrix(k)
}

#[quickcheck]
fn prop_permutation_has_unit_rows_and_columns(seed: u64, n: u8) -> bool {
    let n = 1 + n as usize;
    is_permutation_matrix(&generate_permutation(n, &mut StdRng::seed_from_u64(seed)))
}

#[quickcheck]
fn prop_block_roundtrip_with_t_errors(message: Vec<bool>, seed: u64) -> bool {
    let (public_key, private_key) = shared_keypair();
    let block: BitVector = (0..public_key.params.k)
        .map(|i| message.get(i).copied().unwrap_or(false) as u8)
        .collect();

    let c = public_key
        .encrypt_block_with_rng(&block, &mut StdRng::seed_from_u64(seed))
        .unwrap();
    private_key.decrypt_block(&c).unwrap() == block
}

#[quickcheck]
fn prop_message_roundtrip(data: Vec<u8>) -> bool {
    let (public_key, private_key) = shared_keypair();
    // Each block costs up to C(64, 3) syndrome trials; keep messages short.
    let data = &data[..data.len().min(12)];
    let ciphertext = public_key.encrypt(data).unwrap();
    private_key.decrypt(&ciphertext).unwrap().into_plaintext().unwrap() == data
}
