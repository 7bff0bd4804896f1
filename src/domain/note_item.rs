//! UI-facing note projections: listing snapshots and live handles.

use crate::domain::NoteId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Immutable snapshot of one note, produced by a listing.
///
/// Snapshots are recomputed on every listing; consumers diff successive
/// snapshots rather than holding live references into repository state, so
/// a rename between listings can never leave them aliasing a moved file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteItem {
    /// Stable identity, survives renames.
    pub id: NoteId,
    /// Display title derived from the first content line.
    pub title: String,
    /// Current on-disk location.
    pub path: PathBuf,
    /// Whether the id is in the persisted pinned set.
    pub is_pinned: bool,
    /// Filesystem modification timestamp.
    pub last_modified: DateTime<Utc>,
    /// Whitespace-delimited token count of the full content.
    pub word_count: usize,
}

impl NoteItem {
    /// Returns the current file name, if the path has a UTF-8 final component.
    pub fn filename(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Handle to a single live note: its identity plus current file location.
///
/// Returned by note creation; the recorded path is updated in place when a
/// filename sync moves the file.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteHandle {
    id: NoteId,
    path: PathBuf,
}

impl NoteHandle {
    /// Creates a handle for an existing note file.
    pub fn new(id: NoteId, path: PathBuf) -> Self {
        Self { id, path }
    }

    /// Returns the note's stable identity.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's current file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current file name, if the path has a UTF-8 final component.
    pub fn filename(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }
}
