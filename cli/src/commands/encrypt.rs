use crate::errors::CliError;
use crate::key_file::{read_file, write_file};

use mceliece_crypto::codec::Ciphertext;
use mceliece_crypto::keypair::PublicKey;

use std::path::Path;
use std::time::Instant;

/// Encrypts the bytes in `input` and writes the persisted ciphertext to `output`.
pub fn encrypt_file(
    input: &Path,
    output: &Path,
    public_key: &PublicKey,
) -> Result<Ciphertext, CliError> {
    let plaintext = read_file(input)?;

    let start = Instant::now();
    let ciphertext = public_key.encrypt(&plaintext)?;
    log::info!(
        "Encrypted {} bits into {} blocks in {:?}",
        ciphertext.original_bit_length,
        ciphertext.bits.len() / public_key.params.n,
        start.elapsed()
    );

    write_file(output, ciphertext.to_persisted().as_bytes())?;
    Ok(ciphertext)
}
