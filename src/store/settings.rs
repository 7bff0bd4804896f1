//! Persisted storage preferences consumed by the location resolver.

use crate::infra::{FsError, read_text, write_text};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Settings file name inside the app config directory.
const SETTINGS_FILE_NAME: &str = "config.toml";

/// Errors while persisting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Write(#[from] FsError),
}

/// Application settings, persisted as TOML.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
}

/// Which notes directory is active, and how access to it was granted.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// User-selected directory, referenced through an access grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoped_dir: Option<PathBuf>,
    /// Opaque token minted when the grant was persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoped_token: Option<String>,
    /// Plain path from an earlier settings format; honored read-only as a
    /// fallback, never written for new grants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_dir: Option<PathBuf>,
}

impl StorageSettings {
    /// Clears every persisted directory reference.
    pub fn clear(&mut self) {
        self.scoped_dir = None;
        self.scoped_token = None;
        self.legacy_dir = None;
    }
}

/// Loads and saves [`Settings`] under a fixed config directory.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store writing to `<config_dir>/config.toml`.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SETTINGS_FILE_NAME),
        }
    }

    /// Loads settings; a missing or malformed file yields defaults.
    pub fn load(&self) -> Settings {
        let content = match read_text(&self.path) {
            Ok(content) => content,
            Err(FsError::NotFound { .. }) => return Settings::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read settings; using defaults");
                return Settings::default();
            }
        };

        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "malformed settings; using defaults");
                Settings::default()
            }
        }
    }

    /// Persists settings, creating the config directory on first use.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(settings).expect("settings serialization is infallible");
        write_text(&self.path, &content)?;
        Ok(())
    }
}
