use crate::errors::CliError;
use crate::key_file::KeyFile;

use mceliece_crypto::keypair::{McElieceParams, generate_keypair};

use std::path::Path;
use std::time::Instant;

pub const PUBLIC_KEY_FILE: &str = "public_key.json";
pub const PRIVATE_KEY_FILE: &str = "private_key.json";

/// Writes a fresh key pair into `out_dir` as two JSON key files.
pub fn gen_keypair(params: &McElieceParams, out_dir: &Path) -> Result<(), CliError> {
    let start = Instant::now();
    let (public_key, private_key) = generate_keypair(*params)?;
    log::info!(
        "Generated [{}, {}] key pair with t = {} in {:?}",
        params.n,
        params.k,
        params.t,
        start.elapsed()
    );

    std::fs::create_dir_all(out_dir).map_err(|source| CliError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    KeyFile::new(public_key).save(&out_dir.join(PUBLIC_KEY_FILE))?;
    KeyFile::new(private_key).save(&out_dir.join(PRIVATE_KEY_FILE))?;

    println!("Keys written to {}", out_dir.display());
    Ok(())
}
