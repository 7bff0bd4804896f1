//! Core types: NoteId (UUID), NoteItem/NoteHandle, title extraction

mod note_id;
mod note_item;
mod title;

pub use note_id::{NoteId, ParseNoteIdError};
pub use note_item::{NoteHandle, NoteItem};
pub use title::{FALLBACK_TITLE, extract_title, word_count};
