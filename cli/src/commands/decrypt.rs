use crate::errors::CliError;
use crate::key_file::{read_to_string, write_file};

use mceliece_crypto::codec::Ciphertext;
use mceliece_crypto::keypair::PrivateKey;

use std::path::Path;
use std::time::Instant;

/// Decrypts the persisted ciphertext in `input` and writes the plaintext to `output`.
///
/// Uncorrectable blocks are logged; under the strict policy they fail the command
/// and nothing is written.
pub fn decrypt_file(
    input: &Path,
    output: &Path,
    private_key: &PrivateKey,
) -> Result<Vec<u8>, CliError> {
    let ciphertext = Ciphertext::from_persisted(&read_to_string(input)?)?;

    let start = Instant::now();
    let decryption = private_key.decrypt(&ciphertext)?;
    log::info!("Decrypted {} bits in {:?}", ciphertext.bits.len(), start.elapsed());
    for block in &decryption.failed_blocks {
        log::warn!("Block {} was not corrected", block);
    }

    let plaintext = decryption.into_plaintext()?;
    write_file(output, &plaintext)?;
    Ok(plaintext)
}
