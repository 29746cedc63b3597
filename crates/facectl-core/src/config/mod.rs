//! Configuration management for facectl.
//!
//! Settings live in a small TOML file with a single `[faceplusplus]` table.
//! On first run the file is created from a template and the caller is
//! expected to stop so the operator can fill in real credentials.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for facectl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials, endpoint and batch concurrency
    pub faceplusplus: FaceppConfig,
}

/// What `Config::load_or_bootstrap` found on disk.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file has at least one API setting; use it.
    Ready(Config),
    /// The file had none of the API settings and a template was written.
    Bootstrapped(PathBuf),
}

impl Config {
    /// Load the config at `path`, writing a template if no API setting exists.
    ///
    /// An unreadable file is treated as empty (with a warning), so a missing
    /// file leads straight to the bootstrap. A file that reads but does not
    /// parse is an error.
    pub fn load_or_bootstrap(path: &Path) -> Result<LoadOutcome, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("Unable to read config file {}: {e}", path.display());
                None
            }
        };

        let config = match content.as_deref() {
            Some(text) => Self::parse(text)?,
            None => Self::default(),
        };

        if config.faceplusplus.is_blank() {
            Self::write_template(path, content.as_deref())?;
            tracing::info!("Config template written to {}", path.display());
            return Ok(LoadOutcome::Bootstrapped(path.to_path_buf()));
        }

        Ok(LoadOutcome::Ready(config))
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Write the `[faceplusplus]` defaults to `path`.
    ///
    /// When `existing` holds the current file contents, the defaults are
    /// merged into it so unrelated tables and comments survive.
    pub fn write_template(path: &Path, existing: Option<&str>) -> Result<(), ConfigError> {
        let mut doc = match existing {
            Some(text) => text
                .parse::<toml_edit::DocumentMut>()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?,
            None => toml_edit::DocumentMut::new(),
        };

        let table = doc
            .as_table_mut()
            .entry("faceplusplus")
            .or_insert(toml_edit::table())
            .as_table_mut()
            .ok_or_else(|| {
                ConfigError::ValidationError("faceplusplus must be a table".into())
            })?;

        let defaults = FaceppConfig::template();
        let entries = [
            (KEY_API_KEY, defaults.api_key()),
            (KEY_API_SECRET, defaults.api_secret()),
            (KEY_API_URL, defaults.api_url()),
            (
                KEY_CONCURRENT_REQUESTS,
                defaults.concurrent_requests.as_deref().unwrap_or_default(),
            ),
        ];
        for (key, value) in entries {
            table[key] = toml_edit::value(value);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::WriteError {
                path: path.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, doc.to_string()).map_err(|source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.facectl.facectl/config.toml
    /// - Linux: ~/.config/facectl/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\facectl\config\config.toml
    ///
    /// Falls back to ~/.facectl/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "facectl", "facectl")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".facectl").join("config.toml")
            })
    }

    /// Resolve a user-supplied config path (with ~ expansion).
    pub fn expand_path(raw: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(raw).into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
