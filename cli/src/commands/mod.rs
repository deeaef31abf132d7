mod decrypt;
mod encrypt;
mod gen_keypair;
mod roundtrip;

pub use decrypt::decrypt_file;
pub use encrypt::encrypt_file;
pub use gen_keypair::gen_keypair;
pub use roundtrip::roundtrip;

use crate::args::Command;
use crate::errors::CliError;
use crate::key_file::KeyFile;

use mceliece_crypto::keypair::{PrivateKey, PublicKey};

pub fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Keygen { out_dir, params } => gen_keypair(&params.resolve()?, &out_dir),
        Command::Encrypt { key, input, out } => {
            let key = KeyFile::<PublicKey>::load(&key)?.key;
            encrypt_file(&input, &out, &key).map(|_| ())
        }
        Command::Decrypt { key, input, out } => {
            let key = KeyFile::<PrivateKey>::load(&key)?.key;
            decrypt_file(&input, &out, &key).map(|_| ())
        }
        Command::Roundtrip {
            input,
            work_dir,
            params,
        } => {
            let work_dir = work_dir.unwrap_or_else(std::env::temp_dir);
            if roundtrip(&params.resolve()?, &input, &work_dir)? {
                Ok(())
            } else {
                Err(CliError::Mismatch(input))
            }
        }
    }
}
