use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinnotesError {
    #[error("Not in a pinnotes project. Run 'pinnotes init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .pinnotes/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Note not found: {0}")]
    NotFound(u64),

    #[error("Duplicate note id: {0}")]
    DuplicateId(u64),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, PinnotesError>;
