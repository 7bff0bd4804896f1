//! Persisted set of pinned note ids.
//!
//! Pins are keyed by id, not filename, so they survive renames. The set
//! lives next to the settings file rather than in the notes directory —
//! pinning is a user preference, not note content.

use crate::domain::NoteId;
use crate::infra::{FsError, read_text, write_text};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Pinned-set file name inside the app config directory.
const PINS_FILE_NAME: &str = "pinned.json";

/// Loads and mutates the persisted pinned-id set.
pub struct PinStore {
    path: PathBuf,
}

impl PinStore {
    /// Creates a store writing to `<config_dir>/pinned.json`.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(PINS_FILE_NAME),
        }
    }

    /// Returns the current pinned set; missing or malformed file is empty.
    pub fn pinned_ids(&self) -> BTreeSet<NoteId> {
        let content = match read_text(&self.path) {
            Ok(content) => content,
            Err(FsError::NotFound { .. }) => return BTreeSet::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read pinned set; treating as empty");
                return BTreeSet::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(ids) => ids,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "malformed pinned set; treating as empty");
                BTreeSet::new()
            }
        }
    }

    /// Returns whether `id` is pinned.
    pub fn is_pinned(&self, id: &NoteId) -> bool {
        self.pinned_ids().contains(id)
    }

    /// Flips membership of `id` and persists; returns the new state.
    pub fn toggle(&self, id: &NoteId) -> Result<bool, FsError> {
        let mut ids = self.pinned_ids();
        let now_pinned = if ids.remove(id) {
            false
        } else {
            ids.insert(id.clone());
            true
        };
        self.save(&ids)?;
        Ok(now_pinned)
    }

    /// Removes `id` from the set if present.
    pub fn remove(&self, id: &NoteId) -> Result<(), FsError> {
        let mut ids = self.pinned_ids();
        if ids.remove(id) {
            self.save(&ids)?;
        }
        Ok(())
    }

    fn save(&self, ids: &BTreeSet<NoteId>) -> Result<(), FsError> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| FsError::from_io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(ids).expect("pin serialization is infallible");
        write_text(&self.path, &json)
    }
}
