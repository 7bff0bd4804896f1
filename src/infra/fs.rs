//! File I/O for note directories: atomic writes, scanning, name probing.

use chrono::{DateTime, Utc};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Extension carried by every note file.
pub const NOTE_EXTENSION: &str = "md";

/// Errors during file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parent directory does not exist: {path}")]
    ParentNotFound { path: PathBuf },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Reads a file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, FsError> {
    std::fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
}

/// Writes text to a file atomically.
///
/// Content goes to a temporary file in the target's directory, then an
/// atomic rename replaces the destination. A crash mid-write leaves the
/// previous file intact.
///
/// # Errors
///
/// Returns `FsError::ParentNotFound` if the parent directory doesn't exist.
/// Returns `FsError::AtomicWrite` if the final rename fails.
pub fn write_text(path: &Path, content: &str) -> Result<(), FsError> {
    let parent = path
        .parent()
        .ok_or_else(|| FsError::ParentNotFound { path: path.into() })?;

    if !parent.exists() {
        return Err(FsError::ParentNotFound {
            path: parent.into(),
        });
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.write_all(content.as_bytes()).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

/// Lists note file names (`*.md`) directly inside a directory.
///
/// The scan is flat (no recursion into subdirectories) and skips hidden
/// files, which keeps the index file and editor droppings out of the
/// listing. No enumeration order is guaranteed. Names that are not valid
/// UTF-8 are skipped.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist.
/// Returns `FsError::NotADirectory` if the path is not a directory.
pub fn scan_notes_dir(dir: &Path) -> Result<Vec<String>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let names = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| !is_hidden(e))
        .filter(has_note_extension)
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();

    Ok(names)
}

/// Returns a file's modification time as a UTC timestamp.
pub fn modified_at(path: &Path) -> Result<DateTime<Utc>, FsError> {
    let metadata = std::fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;
    let mtime = metadata.modified().map_err(|e| FsError::from_io(path, e))?;
    Ok(DateTime::<Utc>::from(mtime))
}

/// Finds a collision-free note filename in a directory.
///
/// Returns `"{stem}.{ext}"` if free, otherwise `"{stem} 1.{ext}"`,
/// `"{stem} 2.{ext}"`, and so on. A name equal to `current` counts as
/// free, so re-deriving a note's own filename is a fixed point.
pub fn available_filename(dir: &Path, stem: &str, ext: &str, current: Option<&str>) -> String {
    let candidate = format!("{stem}.{ext}");
    if is_free(dir, &candidate, current) {
        return candidate;
    }

    let mut n = 1u32;
    loop {
        let candidate = format!("{stem} {n}.{ext}");
        if is_free(dir, &candidate, current) {
            return candidate;
        }
        n += 1;
    }
}

fn is_free(dir: &Path, name: &str, current: Option<&str>) -> bool {
    current == Some(name) || !dir.join(name).exists()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn has_note_extension(entry: &DirEntry) -> bool {
    entry
        .path()
        .extension()
        .is_some_and(|e| e == NOTE_EXTENSION)
}
