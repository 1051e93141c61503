use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Process settings, read from a TOML file. Every section falls back to its
/// default when absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

/// Bind address for the HTTP listener.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub address: String,
    pub port: u16,
}

/// Location of the durable object database.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub path: PathBuf,
}

/// Logging level and output format.
///
/// `level` is one of `debug`, `info`, `warn`, `error`; `format` is `text` or
/// `json`. Unknown values are rejected when the subscriber is built, at
/// startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub format: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cubby.db"),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl Settings {
    /// Load settings from the TOML file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|err| ServerError::Config(format!("reading {}: {err}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|err| ServerError::Config(format!("parsing {}: {err}", path.display())))
    }
}
