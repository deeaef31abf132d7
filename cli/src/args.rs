use crate::errors::CliError;
use crate::key_file::read_to_string;

use clap::{Parser, Subcommand, ValueEnum};
use mceliece_crypto::keypair::{DecodePolicy, McElieceParams};

use std::path::PathBuf;

/// McEliece key generation and file encryption over GF(2).
///
/// Set RUST_LOG=debug for progress output.
#[derive(Debug, Parser)]
#[command(name = "mceliece", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a key pair into a directory.
    Keygen {
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Encrypt a file with a public key.
    Encrypt {
        #[arg(long, value_name = "PUBLIC.json")]
        key: PathBuf,
        #[arg(long = "in", value_name = "PLAINTEXT")]
        input: PathBuf,
        #[arg(long, value_name = "CIPHERTEXT")]
        out: PathBuf,
    },
    /// Decrypt a file with a private key.
    Decrypt {
        #[arg(long, value_name = "PRIVATE.json")]
        key: PathBuf,
        #[arg(long = "in", value_name = "CIPHERTEXT")]
        input: PathBuf,
        #[arg(long, value_name = "PLAINTEXT")]
        out: PathBuf,
    },
    /// Generate keys, encrypt and decrypt a file, and compare the result.
    Roundtrip {
        #[arg(long = "in", value_name = "PLAINTEXT")]
        input: PathBuf,
        /// Where the intermediate files go. Defaults to the system temp directory.
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
        #[command(flatten)]
        params: ParamArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Strict,
    BestEffort,
}

impl From<PolicyArg> for DecodePolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Strict => DecodePolicy::Strict,
            PolicyArg::BestEffort => DecodePolicy::BestEffort,
        }
    }
}

/// Key parameters: an optional JSON file, then per-field overrides.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ParamArgs {
    /// JSON file holding `McElieceParams`.
    #[arg(long = "params", value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Codeword length.
    #[arg(long)]
    pub n: Option<usize>,
    /// Message block length.
    #[arg(long)]
    pub k: Option<usize>,
    /// Errors injected per block.
    #[arg(long)]
    pub t: Option<usize>,
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

impl ParamArgs {
    /// Builds validated parameters from the file (or defaults) and the overrides.
    pub fn resolve(&self) -> Result<McElieceParams, CliError> {
        let mut params = match &self.file {
            Some(path) => {
                let text = read_to_string(path)?;
                serde_json::from_str(&text).map_err(|source| CliError::Json {
                    path: path.clone(),
                    source,
                })?
            }
            None => McElieceParams::default(),
        };

        if let Some(n) = self.n {
            params.n = n;
        }
        if let Some(k) = self.k {
            params.k = k;
        }
        if let Some(t) = self.t {
            params.t = t;
        }
        if let Some(policy) = self.policy {
            params.decode_policy = policy.into();
        }

        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    fn parse(list: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mceliece").chain(list.iter().copied()))
    }

    fn keygen_params(list: &[&str]) -> ParamArgs {
        let mut args = vec!["keygen", "--out-dir", "keys"];
        args.extend_from_slice(list);
        match parse(&args).unwrap().command {
            Command::Keygen { params, .. } => params,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encrypt() {
        let cli = parse(&["encrypt", "--key", "pub.json", "--in", "a.txt", "--out", "a.enc"]).unwrap();
        match cli.command {
            Command::Encrypt { key, input, out } => {
                assert_eq!(key, PathBuf::from("pub.json"));
                assert_eq!(input, PathBuf::from("a.txt"));
                assert_eq!(out, PathBuf::from("a.enc"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["frobnicate"]).is_err());
        assert!(parse(&["encrypt", "--key", "pub.json", "--in", "a.txt"]).is_err());
        assert!(parse(&["encrypt", "--key"]).is_err());
        assert!(parse(&["keygen", "--out-dir", "keys", "--t", "three"]).is_err());
        assert!(parse(&["keygen", "--out-dir", "keys", "--policy", "lenient"]).is_err());
    }

    #[test]
    fn test_params_overrides() {
        let params = keygen_params(&["--n", "40", "--k", "20", "--t", "2", "--policy", "best-effort"])
            .resolve()
            .unwrap();
        assert_eq!((params.n, params.k, params.t), (40, 20, 2));
        assert_eq!(params.decode_policy, DecodePolicy::BestEffort);
    }

    #[test]
    fn test_params_default() {
        assert_eq!(keygen_params(&[]).resolve().unwrap(), McElieceParams::default());
    }

    #[test]
    fn test_params_file_then_overrides() {
        let path = std::env::temp_dir().join(format!("mceliece-params-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"n":30,"k":15,"t":2,"decode_policy":"BestEffort"}"#).unwrap();

        let params = keygen_params(&["--params", path.to_str().unwrap(), "--t", "1"])
            .resolve()
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!((params.n, params.k, params.t), (30, 15, 1));
        assert_eq!(params.decode_policy, DecodePolicy::BestEffort);
    }

    #[test]
    fn test_params_validated() {
        assert!(matches!(
            keygen_params(&["--k", "64"]).resolve(),
            Err(CliError::Crypto(_))
        ));
        assert!(matches!(
            keygen_params(&["--params", "/nonexistent/params.json"]).resolve(),
            Err(CliError::Io { .. })
        ));
    }
}
