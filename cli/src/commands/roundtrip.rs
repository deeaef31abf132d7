use crate::commands::{decrypt_file, encrypt_file};
use crate::errors::CliError;
use crate::key_file::read_file;

use mceliece_crypto::keypair::{McElieceParams, generate_keypair};

use std::path::Path;
use std::time::Instant;

/// Generates keys, encrypts `input` into `work_dir`, decrypts it back and compares.
pub fn roundtrip(params: &McElieceParams, input: &Path, work_dir: &Path) -> Result<bool, CliError> {
    let (public_key, private_key) = generate_keypair(*params)?;

    let encrypted = work_dir.join("encrypted.txt");
    let decrypted = work_dir.join("decrypted.txt");

    let start = Instant::now();
    encrypt_file(input, &encrypted, &public_key)?;
    let encrypt_time = start.elapsed();

    let start = Instant::now();
    decrypt_file(&encrypted, &decrypted, &private_key)?;
    let decrypt_time = start.elapsed();

    let original = read_file(input)?;
    let recovered = read_file(&decrypted)?;
    let matched = original == recovered;

    println!("{}", if matched { "SUCCESS" } else { "MISMATCH" });
    println!("Encryption time: {:?}", encrypt_time);
    println!("Decryption time: {:?}", decrypt_time);

    Ok(matched)
}
