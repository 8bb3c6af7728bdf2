//! Store error model.

use std::path::PathBuf;

use thiserror::Error;
use worktrack_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Any fault reported by SQLite (I/O, corruption, constraint violation).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to start store runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to prepare database directory {path:?}: {source}")]
    Location {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to resolve database path: {0}")]
    Config(String),

    #[error("{kind} is already persisted with id {id}")]
    AlreadyPersisted { kind: &'static str, id: i64 },

    #[error("{kind} has no id; add it before updating")]
    MissingId { kind: &'static str },

    /// A stored row does not satisfy the domain invariants.
    #[error("corrupt {table} row {id}: {reason}")]
    CorruptRow {
        table: &'static str,
        id: i64,
        #[source]
        reason: DomainError,
    },
}

impl StoreError {
    pub(crate) fn corrupt_row(table: &'static str, id: i64, err: DomainError) -> Self {
        Self::CorruptRow {
            table,
            id,
            reason: err,
        }
    }
}
