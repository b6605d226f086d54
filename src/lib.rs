pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod notification;
pub mod storage;

pub use config::Config;
pub use entity::{Note, NoteDraft};
pub use error::{PinnotesError, Result};
pub use notification::NotificationCenter;
pub use storage::{KeyValueBackend, NotesStore};
