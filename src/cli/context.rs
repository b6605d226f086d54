use std::env;
use std::path::{Path, PathBuf};

use crate::config::{BackendKind, Config};
use crate::error::{PinnotesError, Result};
use crate::notification::{Level, Notification, NotificationCenter, Presenter, Surface};
use crate::storage::{JsonFileBackend, KeyValueBackend, NotesStore, SqliteBackend};

pub const PINNOTES_DIR: &str = ".pinnotes";

pub type Store = NotesStore<Box<dyn KeyValueBackend>>;

/// Everything a command handler needs, built once per invocation
pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub notifier: NotificationCenter,
}

impl AppContext {
    /// Build the context for the project containing the current directory
    pub fn discover() -> Result<Self> {
        Self::load(&find_project_root())
    }

    pub fn load(root: &Path) -> Result<Self> {
        let dir = root.join(PINNOTES_DIR);
        if !dir.is_dir() {
            return Err(PinnotesError::NotInitialized);
        }

        let config = Config::load(&dir)?;
        let notifier = NotificationCenter::new(
            config.notifications.clone(),
            Box::new(TerminalPresenter),
        );

        Ok(Self {
            root: root.to_path_buf(),
            config,
            notifier,
        })
    }

    pub fn pinnotes_dir(&self) -> PathBuf {
        self.root.join(PINNOTES_DIR)
    }

    /// Open a fresh store over the configured backend
    pub fn open_store(&self) -> Result<Store> {
        let dir = self.pinnotes_dir();
        let backend: Box<dyn KeyValueBackend> = match self.config.backend {
            BackendKind::File => Box::new(JsonFileBackend::open(&dir)?),
            BackendKind::Sqlite => Box::new(SqliteBackend::open(&dir)?),
        };
        NotesStore::open_with_key(backend, &self.config.storage_key)
    }

    /// Report an outcome and flush it to the terminal
    pub fn report(&mut self, level: Level, text: impl Into<String>) {
        self.notifier.notify(level, text);
        self.notifier.drain_all();
    }
}

/// Find the project root from the current directory
pub fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    project_root_from(&cwd)
}

/// The nearest ancestor holding .pinnotes/, else the nearest holding .git/,
/// else `start` itself
fn project_root_from(start: &Path) -> PathBuf {
    [PINNOTES_DIR, ".git"]
        .iter()
        .find_map(|marker| start.ancestors().find(|dir| dir.join(marker).exists()))
        .unwrap_or(start)
        .to_path_buf()
}

/// Prints notifications; warnings and errors go to stderr
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn present(&mut self, notification: &Notification) {
        let line = match notification.surface {
            Surface::Popup if !notification.title.is_empty() => {
                format!("{}: {}", notification.title, notification.text)
            }
            _ => notification.text.clone(),
        };

        match notification.level {
            Level::Danger | Level::Warning => eprintln!("{}", line),
            Level::Info | Level::Success => println!("{}", line),
        }
    }
}
