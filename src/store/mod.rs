//! Persistence services: identity index, pins, settings, location, repository

mod index;
mod location;
mod pins;
mod repository;
mod settings;

pub use index::{INDEX_FILE_NAME, IndexError, NoteRecord, NotesIndex};
pub use location::{
    DEFAULT_DIR_NAME, DirectoryLease, LocationError, LocationResolver, default_config_dir,
    default_notes_dir,
};
pub use pins::PinStore;
pub use repository::{NoteRepository, RepositoryError};
pub use settings::{Settings, SettingsError, SettingsStore, StorageSettings};
