use crate::errors::CliError;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use std::path::Path;

/// A key wrapped with the time it was generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFile<K> {
    pub created_at: DateTime<Utc>,
    pub key: K,
}

impl<K: Serialize + DeserializeOwned> KeyFile<K> {
    pub fn new(key: K) -> Self {
        Self {
            created_at: Utc::now(),
            key,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        write_file(path, json.as_bytes())
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn read_to_string(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_file(path: &Path, contents: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
