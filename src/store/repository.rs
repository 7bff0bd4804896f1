//! Note lifecycle orchestration: create, save, rename, list, pin, delete.
//!
//! Every caller-facing operation goes through the repository, which wires
//! the location resolver, the identity index, the pin store, and the pure
//! title/filename functions together. The index is re-read around each
//! mutation so a directory switch between calls is always picked up.

use crate::domain::{NoteHandle, NoteId, NoteItem, extract_title, word_count};
use crate::infra::{
    FsError, NOTE_EXTENSION, available_filename, modified_at, read_text, sanitize_filename,
    scan_notes_dir, write_text,
};
use crate::store::index::{IndexError, NotesIndex};
use crate::store::location::{LocationError, LocationResolver};
use crate::store::pins::PinStore;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Base name given to freshly created notes, before any title exists.
const NEW_NOTE_STEM: &str = "Untitled Note";

/// Errors surfaced by repository operations.
///
/// Failures never escalate past here: callers get a result to report and
/// the previous on-disk state stays valid.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// The single authority for note lifecycle operations.
pub struct NoteRepository {
    resolver: LocationResolver,
    pins: PinStore,
}

impl NoteRepository {
    /// Wires a repository from its explicitly constructed services.
    pub fn new(resolver: LocationResolver, pins: PinStore) -> Self {
        Self { resolver, pins }
    }

    /// Creates a new note file and returns a handle to it.
    ///
    /// The file is named `Untitled Note.md` (with a numeric suffix when
    /// that name is taken) and registered in the index before the content
    /// write, so identity exists from the first byte on disk. A failed
    /// write removes the just-added index entry again.
    pub fn create_note(&mut self, initial_content: &str) -> Result<NoteHandle, RepositoryError> {
        let dir = self.resolver.active_directory()?;
        let filename = available_filename(&dir, NEW_NOTE_STEM, NOTE_EXTENSION, None);
        let id = NoteId::new();

        let mut index = NotesIndex::load(&dir);
        // The name was free on disk, so an entry still under it is an
        // orphan from an external deletion.
        if index.lookup_id(&filename).is_some() {
            debug!(filename = %filename, "clearing stale index entry");
            index.remove_entry(&filename);
        }
        index.add_entry(&filename, id.clone())?;
        index.save(&dir)?;

        let path = dir.join(&filename);
        if let Err(err) = write_text(&path, initial_content) {
            // Compensate: a note that never made it to disk must not leave
            // an orphaned index entry behind.
            let mut index = NotesIndex::load(&dir);
            index.remove_entry(&filename);
            if let Err(save_err) = index.save(&dir) {
                warn!(filename = %filename, error = %save_err, "failed to roll back index entry");
            }
            return Err(err.into());
        }

        debug!(filename = %filename, id = %id, "created note");
        Ok(NoteHandle::new(id, path))
    }

    /// Writes `content` to the note's current file.
    ///
    /// Empty (or whitespace-only) content deletes the note instead: the
    /// file, its index entry, and its pin are removed. Emptied notes do
    /// not persist as zero-byte files. Saving never renames; that is
    /// [`Self::sync_filename_to_title`]'s job.
    pub fn save_content(
        &mut self,
        handle: &NoteHandle,
        content: &str,
    ) -> Result<(), RepositoryError> {
        if content.trim().is_empty() {
            debug!(path = %handle.path().display(), "garbage-collecting emptied note");
            return self.remove_note_file(handle.path(), handle.id());
        }

        write_text(handle.path(), content)?;
        Ok(())
    }

    /// Renames the note file to match its current first-line title.
    ///
    /// Intended to run when the editing session leaves the title line, not
    /// on every keystroke. A no-op when the derived name already matches.
    /// A failed rename (or unreadable file) is logged and the handle keeps
    /// its old filename; the previous state remains intact.
    pub fn sync_filename_to_title(
        &mut self,
        handle: &mut NoteHandle,
    ) -> Result<(), RepositoryError> {
        let path = handle.path().to_path_buf();
        let Some(dir) = path.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        let Some(current) = handle.filename().map(str::to_string) else {
            return Ok(());
        };

        let content = match read_text(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read note for rename; keeping filename");
                return Ok(());
            }
        };

        let stem = sanitize_filename(&extract_title(&content));
        if format!("{stem}.{NOTE_EXTENSION}") == current {
            return Ok(());
        }

        let target = available_filename(&dir, &stem, NOTE_EXTENSION, Some(&current));
        if target == current {
            return Ok(());
        }

        let new_path = dir.join(&target);
        if let Err(err) = std::fs::rename(&path, &new_path) {
            warn!(from = %current, to = %target, error = %err, "rename failed; keeping old filename");
            return Ok(());
        }

        let mut index = NotesIndex::load(&dir);
        index.rename_entry(&current, &target);
        index.save(&dir)?;

        debug!(from = %current, to = %target, "synced filename to title");
        handle.set_path(new_path);
        Ok(())
    }

    /// Lists every note in the active directory as fresh snapshots.
    ///
    /// Files without an index entry are self-healing: a trailing
    /// `_<uuid>` token from the retired filename-encoded format is
    /// adopted when it parses and is unclaimed, otherwise a fresh id is
    /// minted. Either way the id is registered so it stays stable across
    /// listings. No ordering is guaranteed; presentation sorts.
    pub fn list_notes(&mut self) -> Result<Vec<NoteItem>, RepositoryError> {
        let dir = self.resolver.active_directory()?;
        let mut index = NotesIndex::load(&dir);
        let pinned = self.pins.pinned_ids();

        let mut items = Vec::new();
        let mut index_dirty = false;

        for filename in scan_notes_dir(&dir)? {
            let path = dir.join(&filename);

            let content = match read_text(&path) {
                Ok(content) => content,
                Err(err) => {
                    warn!(filename = %filename, error = %err, "skipping unreadable note");
                    continue;
                }
            };
            let last_modified = match modified_at(&path) {
                Ok(mtime) => mtime,
                Err(err) => {
                    warn!(filename = %filename, error = %err, "skipping note without metadata");
                    continue;
                }
            };

            let id = match index.lookup_id(&filename) {
                Some(id) => id,
                None => {
                    let id = legacy_embedded_id(&filename)
                        .filter(|id| index.lookup_filename(id).is_none())
                        .unwrap_or_else(NoteId::new);
                    index.add_entry(&filename, id.clone())?;
                    index_dirty = true;
                    debug!(filename = %filename, id = %id, "indexed externally added note");
                    id
                }
            };

            items.push(NoteItem {
                is_pinned: pinned.contains(&id),
                title: extract_title(&content),
                word_count: word_count(&content),
                id,
                path,
                last_modified,
            });
        }

        if index_dirty {
            index.save(&dir)?;
        }

        Ok(items)
    }

    /// Flips the pinned state of `id`; returns the new state.
    pub fn toggle_pin(&mut self, id: &NoteId) -> Result<bool, RepositoryError> {
        Ok(self.pins.toggle(id)?)
    }

    /// Deletes the note identified by `id`: file, index entry, pin.
    ///
    /// A file that is already gone — or an id the index has never seen —
    /// is not an error; the desired end state is already reached.
    pub fn delete_note(&mut self, id: &NoteId) -> Result<(), RepositoryError> {
        let dir = self.resolver.active_directory()?;
        let index = NotesIndex::load(&dir);

        if let Some(filename) = index.lookup_filename(id).map(str::to_string) {
            self.remove_note_file(&dir.join(&filename), id)?;
        } else {
            self.pins.remove(id)?;
        }
        Ok(())
    }

    /// Returns the active notes directory.
    pub fn active_directory(&mut self) -> Result<PathBuf, RepositoryError> {
        Ok(self.resolver.active_directory()?)
    }

    /// Persists a user-selected notes directory. See
    /// [`LocationResolver::set_custom_directory`].
    pub fn set_custom_directory(&mut self, path: &Path) -> Result<(), RepositoryError> {
        Ok(self.resolver.set_custom_directory(path)?)
    }

    /// Copies notes to `new_path` and switches to it. See
    /// [`LocationResolver::migrate`].
    pub fn migrate(&mut self, new_path: &Path) -> Result<(), RepositoryError> {
        Ok(self.resolver.migrate(new_path)?)
    }

    /// Returns to the default storage location. See
    /// [`LocationResolver::reset_to_default`].
    pub fn reset_to_default(&mut self) -> Result<(), RepositoryError> {
        Ok(self.resolver.reset_to_default()?)
    }

    /// Removes a note's file, index entry, and pin.
    fn remove_note_file(&mut self, path: &Path, id: &NoteId) -> Result<(), RepositoryError> {
        match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "note file already gone");
            }
            Err(err) => return Err(FsError::from_io(path, err).into()),
        }

        if let (Some(dir), Some(filename)) = (
            path.parent(),
            path.file_name().and_then(|n| n.to_str()),
        ) {
            let mut index = NotesIndex::load(dir);
            index.remove_entry(filename);
            index.save(dir)?;
        }

        self.pins.remove(id)?;
        Ok(())
    }
}

/// Parses the trailing `_<uuid>` token of the retired filename-encoded
/// identity format, e.g. `Ideas_f47ac10b-....md`.
fn legacy_embedded_id(filename: &str) -> Option<NoteId> {
    let stem = Path::new(filename).file_stem()?.to_str()?;
    let (_, token) = stem.rsplit_once('_')?;
    token.parse().ok()
}
