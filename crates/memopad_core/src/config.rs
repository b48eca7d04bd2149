//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path and logging settings for binaries.
//! - Hold the storage key names used by the persistence adapter.
//!
//! # Invariants
//! - Blank environment values are treated as unset.

use crate::logging::LogLevel;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "MEMOPAD_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "MEMOPAD_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "MEMOPAD_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "memopad.sqlite3";
const DEFAULT_NOTES_KEY: &str = "notes";
const DEFAULT_FIRST_LOAD_KEY: &str = "notesAppFirstLoad";

/// Storage key names for the note snapshot and the first-run flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub notes: String,
    pub first_load: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            notes: DEFAULT_NOTES_KEY.to_string(),
            first_load: DEFAULT_FIRST_LOAD_KEY.to_string(),
        }
    }
}

/// Process-level settings for the CLI and other hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays disabled when `None`.
    pub log_dir: Option<String>,
    pub keys: StorageKeys,
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through a caller-provided variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| LogLevel::for_build().to_string()),
            log_dir: read(LOG_DIR_ENV),
            keys: StorageKeys::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::LogLevel;
    use std::path::PathBuf;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(|_| Some("   ".to_string()));
        assert!(config.db_path.ends_with("memopad.sqlite3"));
        assert_eq!(config.log_level, LogLevel::for_build().as_str());
        assert_eq!(config.log_dir, None);
        assert_eq!(config.keys.notes, "notes");
        assert_eq!(config.keys.first_load, "notesAppFirstLoad");
    }

    #[test]
    fn explicit_values_are_trimmed() {
        let config = AppConfig::from_lookup(|name| match name {
            DB_PATH_ENV => Some(" /tmp/notes.db ".to_string()),
            LOG_LEVEL_ENV => Some("warn".to_string()),
            LOG_DIR_ENV => Some("/tmp/memopad-logs".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/tmp/notes.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/memopad-logs"));
    }
}
