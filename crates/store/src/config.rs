//! Where the database lives.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;

use crate::error::{StoreError, StoreResult};

/// Environment variable overriding the database file path.
pub const DB_PATH_ENV: &str = "WORKTRACK_DB_PATH";

const DB_FILE_NAME: &str = "work_tracker.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    /// Private in-memory database; its contents vanish when the connection closes.
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: DatabaseLocation,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DatabaseLocation::File(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: DatabaseLocation::InMemory,
        }
    }

    /// `$WORKTRACK_DB_PATH` if set, otherwise `{app_data_dir}/worktrack/work_tracker.db`.
    pub fn from_env() -> StoreResult<Self> {
        match std::env::var_os(DB_PATH_ENV) {
            Some(path) if !path.is_empty() => Ok(Self::new(path)),
            _ => Ok(Self::new(default_db_path()?)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            DatabaseLocation::File(path) => Some(path),
            DatabaseLocation::InMemory => None,
        }
    }

    /// Connection options; creates the parent directory of a file database.
    pub(crate) fn connect_options(&self) -> StoreResult<SqliteConnectOptions> {
        let options = match &self.location {
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|source| StoreError::Location {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
            }
            DatabaseLocation::InMemory => SqliteConnectOptions::from_str("sqlite::memory:")?,
        };
        Ok(options.foreign_keys(true))
    }
}

/// Resolve `{app_data_dir}/worktrack/work_tracker.db`.
fn default_db_path() -> StoreResult<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or_else(|| {
            StoreError::Config(
                "failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share"
                    .to_string(),
            )
        })?;

    dir.push("worktrack");
    dir.push(DB_FILE_NAME);
    Ok(dir)
}
