use std::path::PathBuf;

use serde::Serialize;

use crate::error::SqlTxnError;

use super::connection::SqliteConnection;

/// Path value that selects a transient, process-local database.
pub const MEMORY_MARKER: &str = ":memory:";

/// Where a connection's data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DbTarget {
    /// Not persisted; discarded when the connection closes.
    Memory,
    /// File-backed database, created if absent.
    File(PathBuf),
}

impl DbTarget {
    /// Interpret a user-supplied path, honoring the `:memory:` marker.
    #[must_use]
    pub fn from_path(db_path: &str) -> Self {
        if db_path == MEMORY_MARKER {
            DbTarget::Memory
        } else {
            DbTarget::File(PathBuf::from(db_path))
        }
    }
}

/// Options for opening a `SQLite` connection.
#[derive(Debug, Clone, Serialize)]
pub struct SqliteOptions {
    pub target: DbTarget,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: &str) -> Self {
        Self {
            target: DbTarget::from_path(db_path),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            target: DbTarget::Memory,
        }
    }

    /// Reject targets that cannot be opened.
    ///
    /// # Errors
    /// Returns `SqlTxnError::ConfigError` for an empty file path.
    pub fn validate(&self) -> Result<(), SqlTxnError> {
        match &self.target {
            DbTarget::File(path) if path.as_os_str().is_empty() => Err(
                SqlTxnError::ConfigError("database path must not be empty".into()),
            ),
            _ => Ok(()),
        }
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: &str) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn in_memory(mut self, in_memory: bool) -> Self {
        if in_memory {
            self.opts.target = DbTarget::Memory;
        }
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open a connection with the accumulated options.
    ///
    /// # Errors
    ///
    /// Returns `SqlTxnError` if the options are invalid or the database cannot be opened.
    pub fn open(self) -> Result<SqliteConnection, SqlTxnError> {
        SqliteConnection::open(&self.finish())
    }
}
