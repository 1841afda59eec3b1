use std::fmt;

use tracing::{debug, info};

use crate::error::SqlTxnError;
use crate::sqlite::config::{DbTarget, SqliteOptions};
use crate::types::TxState;

/// Exclusive handle to one `SQLite` session plus its tracked transaction state.
///
/// The state is changed only by `begin`, `commit` and `rollback`; it is never read
/// back from the engine's autocommit flag.
pub struct SqliteConnection {
    pub(crate) conn: rusqlite::Connection,
    pub(crate) state: TxState,
    pub(crate) force_rollback_failure: bool,
    target: DbTarget,
}

impl SqliteConnection {
    /// Open a connection. The new connection is always `Idle`.
    ///
    /// # Errors
    /// Returns `SqlTxnError` if the options are invalid or `SQLite` cannot open the target.
    pub fn open(opts: &SqliteOptions) -> Result<Self, SqlTxnError> {
        opts.validate()?;
        let conn = match &opts.target {
            DbTarget::Memory => rusqlite::Connection::open_in_memory(),
            DbTarget::File(path) => rusqlite::Connection::open(path),
        }
        .map_err(|e| {
            SqlTxnError::ConnectionError(format!("failed to open {:?}: {e}", opts.target))
        })?;
        info!(db = ?opts.target, "sqlite connection opened");
        Ok(Self {
            conn,
            state: TxState::Idle,
            force_rollback_failure: false,
            target: opts.target.clone(),
        })
    }

    /// Shorthand for `open(&SqliteOptions::in_memory())`.
    ///
    /// # Errors
    /// Returns `SqlTxnError::ConnectionError` if `SQLite` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, SqlTxnError> {
        Self::open(&SqliteOptions::in_memory())
    }

    #[must_use]
    pub fn state(&self) -> TxState {
        self.state
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.state.is_in_transaction()
    }

    #[must_use]
    pub fn target(&self) -> &DbTarget {
        &self.target
    }

    /// Close the connection, discarding any transaction still open.
    ///
    /// # Errors
    /// Returns `SqlTxnError` if the rollback or the close itself fails.
    pub fn close(mut self) -> Result<(), SqlTxnError> {
        if self.in_transaction() {
            debug!("closing with an open transaction; rolling back");
            self.rollback()?;
        }
        let target = self.target;
        self.conn.close().map_err(|(_, e)| {
            SqlTxnError::ConnectionError(format!("failed to close {target:?}: {e}"))
        })?;
        info!(db = ?target, "sqlite connection closed");
        Ok(())
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("target", &self.target)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
