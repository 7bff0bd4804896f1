//! Active notes-directory resolution: default location, user-selected
//! directories behind access leases, and migration between locations.

use crate::infra::{FsError, NOTE_EXTENSION, available_filename, scan_notes_dir};
use crate::store::settings::{SettingsError, SettingsStore};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Folder name of the default location inside the user's document area.
pub const DEFAULT_DIR_NAME: &str = "Driftnote";

/// App folder name inside the platform config directory.
const APP_CONFIG_DIR: &str = "driftnote";

/// Errors during location resolution and migration.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("directory is not writable: {path}: {source}")]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Fs(#[from] FsError),
}

/// Returns the platform config directory for this application.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_CONFIG_DIR)
}

/// Returns the default notes location inside the user's document area.
pub fn default_notes_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Scoped access to one notes directory.
///
/// Stands in for a platform permission grant: acquired when a directory
/// becomes active, checked for staleness before reuse, and released on
/// drop. The resolver holds at most one lease and always releases before
/// reacquiring.
#[derive(Debug)]
pub struct DirectoryLease {
    path: PathBuf,
}

impl DirectoryLease {
    /// Begins an access session for `path`.
    pub fn acquire(path: &Path) -> Result<Self, LocationError> {
        if !path.is_dir() {
            return Err(LocationError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "acquired directory lease");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Returns the leased directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the underlying directory still exists.
    pub fn is_still_valid(&self) -> bool {
        self.path.is_dir()
    }
}

impl Drop for DirectoryLease {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "released directory lease");
    }
}

/// Resolves the active notes directory.
///
/// Resolution order: an injected override (never persisted), then a valid
/// persisted scoped reference, then a legacy plain path, then the default
/// location (created on demand). Stale scoped references are discarded at
/// detection time.
pub struct LocationResolver {
    settings: SettingsStore,
    default_dir: PathBuf,
    override_dir: Option<PathBuf>,
    lease: Option<DirectoryLease>,
}

impl LocationResolver {
    /// Creates a resolver over a settings store and default location.
    pub fn new(settings: SettingsStore, default_dir: PathBuf) -> Self {
        Self {
            settings,
            default_dir,
            override_dir: None,
            lease: None,
        }
    }

    /// Injects a directory that outranks every persisted reference. Used
    /// by the composition root for explicit `--dir` invocations.
    pub fn with_override(mut self, dir: Option<PathBuf>) -> Self {
        self.override_dir = dir;
        self
    }

    /// Resolves the active directory and ensures a live lease on it.
    pub fn active_directory(&mut self) -> Result<PathBuf, LocationError> {
        let target = self.resolve_target()?;

        let held = self
            .lease
            .as_ref()
            .is_some_and(|l| l.path() == target && l.is_still_valid());
        if !held {
            // Release-before-reacquire, also on the error path below.
            self.lease = None;
            self.lease = Some(DirectoryLease::acquire(&target)?);
        }

        Ok(target)
    }

    /// Persists `path` as the user-selected notes directory.
    ///
    /// The directory must already exist; writability is proven with a
    /// throwaway temp file. On failure nothing is persisted and the
    /// previous location stays active.
    pub fn set_custom_directory(&mut self, path: &Path) -> Result<(), LocationError> {
        if !path.is_dir() {
            return Err(LocationError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        probe_writable(path)?;
        self.persist_scoped(path)?;
        info!(path = %path.display(), "custom notes directory set");
        Ok(())
    }

    /// Clears persisted directory references; subsequent resolution falls
    /// back to the default location.
    pub fn reset_to_default(&mut self) -> Result<(), LocationError> {
        let mut settings = self.settings.load();
        settings.storage.clear();
        self.settings.save(&settings)?;
        self.lease = None;
        info!("storage location reset to default");
        Ok(())
    }

    /// Copies every note file from the active directory into `new_path`
    /// and makes `new_path` the active location.
    ///
    /// Name collisions at the destination get a numeric suffix before the
    /// extension. The index file is not copied; the destination re-derives
    /// identity on first listing. Failure leaves the old location active;
    /// files copied before a failure are not removed.
    pub fn migrate(&mut self, new_path: &Path) -> Result<(), LocationError> {
        let from = self.active_directory()?;

        std::fs::create_dir_all(new_path).map_err(|e| LocationError::CreateDir {
            path: new_path.to_path_buf(),
            source: e,
        })?;
        probe_writable(new_path)?;

        if !same_directory(&from, new_path) {
            for filename in scan_notes_dir(&from)? {
                let src = from.join(&filename);
                let dest_name = available_copy_name(new_path, &filename);
                let dest = new_path.join(&dest_name);
                std::fs::copy(&src, &dest).map_err(|e| LocationError::Copy {
                    from: src.clone(),
                    to: dest.clone(),
                    source: e,
                })?;
            }
        }

        self.persist_scoped(new_path)?;
        info!(from = %from.display(), to = %new_path.display(), "notes migrated");
        Ok(())
    }

    fn resolve_target(&mut self) -> Result<PathBuf, LocationError> {
        if let Some(dir) = &self.override_dir {
            std::fs::create_dir_all(dir).map_err(|e| LocationError::CreateDir {
                path: dir.clone(),
                source: e,
            })?;
            return Ok(dir.clone());
        }

        let mut settings = self.settings.load();

        if let Some(dir) = settings.storage.scoped_dir.clone() {
            if dir.is_dir() {
                return Ok(dir);
            }
            warn!(path = %dir.display(), "stale scoped directory grant; discarding");
            settings.storage.scoped_dir = None;
            settings.storage.scoped_token = None;
            if let Err(err) = self.settings.save(&settings) {
                warn!(error = %err, "failed to persist removal of stale grant");
            }
        }

        if let Some(dir) = settings.storage.legacy_dir.clone()
            && dir.is_dir()
        {
            debug!(path = %dir.display(), "using legacy plain-path directory");
            return Ok(dir);
        }

        std::fs::create_dir_all(&self.default_dir).map_err(|e| LocationError::CreateDir {
            path: self.default_dir.clone(),
            source: e,
        })?;
        Ok(self.default_dir.clone())
    }

    fn persist_scoped(&mut self, path: &Path) -> Result<(), LocationError> {
        let mut settings = self.settings.load();
        settings.storage.scoped_dir = Some(path.to_path_buf());
        settings.storage.scoped_token = Some(Uuid::new_v4().to_string());
        settings.storage.legacy_dir = None;
        self.settings.save(&settings)?;
        // Next resolution acquires the new location.
        self.lease = None;
        Ok(())
    }
}

/// Proves a directory is writable with a create+delete of a temp file.
fn probe_writable(dir: &Path) -> Result<(), LocationError> {
    NamedTempFile::new_in(dir)
        .map(drop)
        .map_err(|e| LocationError::NotWritable {
            path: dir.to_path_buf(),
            source: e,
        })
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn available_copy_name(dir: &Path, filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or(NOTE_EXTENSION);
    available_filename(dir, stem, ext, None)
}
