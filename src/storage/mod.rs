mod backend;
mod file_backend;
mod notes_store;
pub mod ordering;
mod sqlite_backend;

pub use backend::{KeyValueBackend, MemoryBackend};
pub use file_backend::JsonFileBackend;
pub use notes_store::{NotesStore, NOTES_KEY};
pub use ordering::{PinPolicy, Placement};
pub use sqlite_backend::SqliteBackend;
