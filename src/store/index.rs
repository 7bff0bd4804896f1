//! Filename ⇄ UUID index persisted alongside the notes.
//!
//! The index is a cache for identity, not for content: deleting it loses
//! nothing durable, because the next listing re-identifies every file. It
//! exists so a note keeps its id while its filename follows the title.

use crate::domain::NoteId;
use crate::infra::{FsError, read_text, write_text};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the index file inside a notes directory. The leading dot keeps
/// it out of the note scan.
pub const INDEX_FILE_NAME: &str = ".note-index.json";

/// Current schema version written to new index files.
const INDEX_VERSION: u32 = 1;

/// Errors from index mutations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// `add_entry` was called for a filename that is already registered.
    #[error("filename already indexed: {filename}")]
    DuplicateFilename { filename: String },
}

/// Per-note metadata stored under the filename key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub uuid: NoteId,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Utc>,
}

/// The persisted filename ⇄ id mapping.
///
/// `notes` maps filename → record; `uuid_to_filename` is the denormalized
/// reverse map. The two are kept bijective through every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesIndex {
    notes: HashMap<String, NoteRecord>,
    #[serde(rename = "uuidToFilename")]
    uuid_to_filename: HashMap<NoteId, String>,
    version: u32,
}

impl Default for NotesIndex {
    fn default() -> Self {
        Self {
            notes: HashMap::new(),
            uuid_to_filename: HashMap::new(),
            version: INDEX_VERSION,
        }
    }
}

impl NotesIndex {
    /// Loads the index from a notes directory.
    ///
    /// A missing or unparsable file yields an empty index — corruption
    /// means "no prior knowledge", never a caller-visible error. A file
    /// whose reverse map disagrees with `notes` (hand edits, partial
    /// legacy state) has the reverse map rebuilt from the forward one.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(INDEX_FILE_NAME);

        let content = match read_text(&path) {
            Ok(content) => content,
            Err(FsError::NotFound { .. }) => return Self::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read index; starting empty");
                return Self::default();
            }
        };

        let mut index: NotesIndex = match serde_json::from_str(&content) {
            Ok(index) => index,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed index; starting empty");
                return Self::default();
            }
        };

        if !index.is_bijective() {
            warn!(path = %path.display(), "index maps disagree; rebuilding reverse map");
            index.rebuild_reverse_map();
        }

        index
    }

    /// Persists the index into a notes directory, atomically replacing the
    /// previous file.
    pub fn save(&self, dir: &Path) -> Result<(), FsError> {
        let path = dir.join(INDEX_FILE_NAME);
        let json = serde_json::to_string_pretty(self).expect("index serialization is infallible");
        write_text(&path, &json)
    }

    /// Registers a brand-new note under `filename`.
    ///
    /// The caller must have established on-disk uniqueness of the name
    /// first; a duplicate filename is an error.
    pub fn add_entry(&mut self, filename: &str, id: NoteId) -> Result<(), IndexError> {
        if self.notes.contains_key(filename) {
            return Err(IndexError::DuplicateFilename {
                filename: filename.to_string(),
            });
        }

        self.uuid_to_filename
            .insert(id.clone(), filename.to_string());
        self.notes.insert(
            filename.to_string(),
            NoteRecord {
                uuid: id,
                created_date: Utc::now(),
            },
        );
        Ok(())
    }

    /// Removes the record for `filename` and its reverse mapping. No-op if
    /// the filename is not indexed.
    pub fn remove_entry(&mut self, filename: &str) {
        if let Some(record) = self.notes.remove(filename) {
            self.uuid_to_filename.remove(&record.uuid);
        }
    }

    /// Moves the record from `old` to `new`, keeping its identity and
    /// creation date. Logged no-op when `old` is not indexed.
    pub fn rename_entry(&mut self, old: &str, new: &str) {
        let Some(record) = self.notes.remove(old) else {
            debug!(old, new, "rename of unindexed filename; ignoring");
            return;
        };
        self.uuid_to_filename
            .insert(record.uuid.clone(), new.to_string());
        self.notes.insert(new.to_string(), record);
    }

    /// Looks up the id registered for a filename.
    pub fn lookup_id(&self, filename: &str) -> Option<NoteId> {
        self.notes.get(filename).map(|r| r.uuid.clone())
    }

    /// Looks up the current filename for an id.
    pub fn lookup_filename(&self, id: &NoteId) -> Option<&str> {
        self.uuid_to_filename.get(id).map(String::as_str)
    }

    /// Returns the number of indexed notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true when no notes are indexed.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn is_bijective(&self) -> bool {
        self.notes.len() == self.uuid_to_filename.len()
            && self.notes.iter().all(|(filename, record)| {
                self.uuid_to_filename.get(&record.uuid).map(String::as_str)
                    == Some(filename.as_str())
            })
    }

    fn rebuild_reverse_map(&mut self) {
        self.uuid_to_filename = self
            .notes
            .iter()
            .map(|(filename, record)| (record.uuid.clone(), filename.clone()))
            .collect();
    }
}
