//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe logging and storage settings in one serializable value.
//! - Build the snapshot backend selected by configuration.
//!
//! # Invariants
//! - `validate()` must pass before a config is used to open storage.
//! - File-backed storage requires a non-empty path.

use crate::logging::{default_log_level, normalize_level};
use crate::model::category::{CategorySet, DEFAULT_CATEGORIES};
use crate::persist::{
    JsonFileSnapshotStore, MemorySnapshotStore, PersistResult, SnapshotStore,
    SqliteSnapshotStore,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Where snapshots are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Nothing survives the process.
    Memory,
    /// One JSON document.
    JsonFile { path: PathBuf },
    /// SQLite database file.
    Sqlite { path: PathBuf },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Memory
    }
}

/// Top-level core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory; `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
    pub storage: StorageConfig,
    /// Categories for a store that has never been saved.
    pub seed_categories: Vec<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            storage: StorageConfig::default(),
            seed_categories: DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidLogLevel(String),
    EmptyStoragePath,
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::EmptyStoragePath => write!(f, "storage path cannot be empty"),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON config document. Missing keys take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;

        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }

        match &self.storage {
            StorageConfig::Memory => Ok(()),
            StorageConfig::JsonFile { path } | StorageConfig::Sqlite { path } => {
                if path.as_os_str().is_empty() {
                    Err(ConfigError::EmptyStoragePath)
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn seed_category_set(&self) -> CategorySet {
        CategorySet::from_names(self.seed_categories.iter().cloned())
    }

    /// Opens the configured snapshot backend.
    pub fn open_persistence(&self) -> PersistResult<Box<dyn SnapshotStore + Send>> {
        let store: Box<dyn SnapshotStore + Send> = match &self.storage {
            StorageConfig::Memory => Box::new(MemorySnapshotStore::new()),
            StorageConfig::JsonFile { path } => Box::new(JsonFileSnapshotStore::new(path.clone())),
            StorageConfig::Sqlite { path } => Box::new(SqliteSnapshotStore::open(path)?),
        };
        Ok(store)
    }
}
