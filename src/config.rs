use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PinnotesError, Result};
use crate::notification::NotificationConfig;
use crate::storage::{PinPolicy, Placement, NOTES_KEY};

pub const CONFIG_FILE: &str = "config.yaml";

/// Where the notes collection is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// `<key>.json` files
    #[default]
    File,
    /// `notes.db`
    Sqlite,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::File => write!(f, "file"),
            BackendKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Project configuration, read from `.pinnotes/config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendKind,
    pub storage_key: String,
    pub placement: Placement,
    pub pin_policy: PinPolicy,
    pub notifications: NotificationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            storage_key: NOTES_KEY.to_string(),
            placement: Placement::Append,
            pin_policy: PinPolicy::Renumber,
            notifications: NotificationConfig::default(),
        }
    }
}

impl Config {
    /// Load the config from `dir`, falling back to defaults if the file is absent
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(dir.join(CONFIG_FILE), yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(PinnotesError::Config(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
