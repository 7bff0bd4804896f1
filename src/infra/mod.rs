//! File I/O and filename utilities

mod fs;
mod sanitize;

pub use fs::{
    FsError, NOTE_EXTENSION, available_filename, modified_at, read_text, scan_notes_dir,
    write_text,
};
pub use sanitize::{FALLBACK_FILENAME, sanitize_filename};
