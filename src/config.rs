//! Runtime configuration and the credential store.
//!
//! Settings come from command-line flags or the environment (`.env` is
//! honoured). The API key may instead live in a TOML secrets file:
//! `./secrets.toml`, else `<config dir>/geofinder/secrets.toml`.

use crate::place::client::DEFAULT_ENDPOINT;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the credential, both as environment variable and secret key.
pub const API_KEY_VAR: &str = "GEOAPIFY_KEY";

pub const DEFAULT_CATEGORIES_PATH: &str = "data/categories.txt";
pub const DEFAULT_CURRENCIES_PATH: &str = "data/currencies.txt";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const SECRETS_FILE: &str = "secrets.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub categories_path: PathBuf,
    pub currencies_path: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_ENDPOINT.to_string(),
            categories_path: PathBuf::from(DEFAULT_CATEGORIES_PATH),
            currencies_path: PathBuf::from(DEFAULT_CURRENCIES_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Fill a missing or blank API key from the secret store.
    pub fn with_secret_fallback(mut self, secrets: &SecretStore) -> Self {
        let has_key = self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty());
        if !has_key {
            self.api_key = secrets.get(API_KEY_VAR).map(str::to_string);
        }
        self
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_url", &self.api_url)
            .field("categories_path", &self.categories_path)
            .field("currencies_path", &self.currencies_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// String secrets read from a flat TOML table.
#[derive(Default)]
pub struct SecretStore {
    values: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl SecretStore {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table: toml::Table = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let values = table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();
        Ok(Self {
            values,
            source: Some(path.to_path_buf()),
        })
    }

    /// Load the first secrets file that exists; empty if none does.
    pub fn discover() -> Self {
        for path in Self::candidate_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(store) => {
                    tracing::debug!(path = %path.display(), "secrets loaded");
                    return store;
                }
                Err(e) => tracing::warn!(error = %e, "ignoring unreadable secrets file"),
            }
        }
        Self::default()
    }

    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(SECRETS_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("geofinder").join(SECRETS_FILE));
        }
        paths
    }

    /// A non-blank secret by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Where the secrets were read from, if anywhere.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
