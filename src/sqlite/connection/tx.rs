use tracing::{debug, warn};

use crate::error::SqlTxnError;
use crate::types::TxState;

use super::SqliteConnection;

impl SqliteConnection {
    /// Begin a transaction, transitioning this connection into transactional mode.
    ///
    /// # Errors
    /// Returns `SqlTxnError` if the transaction cannot be started or is already active.
    pub fn begin(&mut self) -> Result<(), SqlTxnError> {
        if self.in_transaction() {
            return Err(SqlTxnError::TransactionActive(
                "BEGIN issued while a transaction is open".into(),
            ));
        }
        self.conn.execute_batch("BEGIN")?;
        self.state = TxState::InTransaction;
        debug!("transaction started");
        Ok(())
    }

    /// Commit the open transaction. A no-op on an idle connection.
    ///
    /// If the engine already left the transaction (a `COMMIT` or `ROLLBACK` sent
    /// through `execute_batch`), nothing is committed here: the state is reset
    /// to `Idle` and `TransactionEnded` is returned, since whether that work
    /// was kept is unknown.
    ///
    /// # Errors
    /// Returns `SqlTxnError::TransactionEnded` as described above, or
    /// `SqlTxnError::SqliteError` if `SQLite` refuses the commit; the transaction stays open.
    pub fn commit(&mut self) -> Result<(), SqlTxnError> {
        if !self.in_transaction() {
            debug!("commit on idle connection ignored");
            return Ok(());
        }
        if self.conn.is_autocommit() {
            self.state = TxState::Idle;
            warn!("commit found no open transaction in the engine; state reset to idle");
            return Err(SqlTxnError::TransactionEnded(
                "the transaction was finished outside the wrapper".into(),
            ));
        }
        self.conn.execute_batch("COMMIT")?;
        self.state = TxState::Idle;
        debug!("transaction committed");
        Ok(())
    }

    /// Roll back the open transaction. A no-op on an idle connection.
    ///
    /// # Errors
    /// Returns `SqlTxnError` if `SQLite` refuses the rollback; the transaction stays open.
    pub fn rollback(&mut self) -> Result<(), SqlTxnError> {
        self.rollback_inner().map_err(SqlTxnError::SqliteError)
    }

    /// Make the next rollback fail with `SQLITE_BUSY` without touching the engine.
    #[doc(hidden)]
    pub fn force_rollback_failure_for_tests(&mut self) {
        self.force_rollback_failure = true;
    }

    pub(crate) fn rollback_inner(&mut self) -> Result<(), rusqlite::Error> {
        if !self.in_transaction() {
            debug!("rollback on idle connection ignored");
            return Ok(());
        }
        if std::mem::take(&mut self.force_rollback_failure) {
            return Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
                Some("forced rollback failure".into()),
            ));
        }
        // Some failures (SQLITE_FULL, SQLITE_NOMEM, ...) make SQLite abandon the
        // transaction itself; a second ROLLBACK would then error.
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        self.state = TxState::Idle;
        debug!("transaction rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_commit_round_trip_tracks_state() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        assert_eq!(conn.state(), TxState::Idle);
        conn.begin().unwrap();
        assert_eq!(conn.state(), TxState::InTransaction);
        conn.commit().unwrap();
        assert_eq!(conn.state(), TxState::Idle);
    }

    #[test]
    fn nested_begin_is_refused() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.begin().unwrap();
        let err = conn.begin().unwrap_err();
        assert!(matches!(err, SqlTxnError::TransactionActive(_)));
        assert!(conn.in_transaction());
    }

    #[test]
    fn finishing_an_idle_connection_is_a_no_op() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.commit().unwrap();
        conn.rollback().unwrap();
        assert_eq!(conn.state(), TxState::Idle);
    }

    #[test]
    fn commit_after_external_commit_resets_to_idle() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.begin().unwrap();
        conn.execute_batch("COMMIT").unwrap();

        let err = conn.commit().unwrap_err();
        assert!(matches!(err, SqlTxnError::TransactionEnded(_)));
        assert_eq!(conn.state(), TxState::Idle);

        // the connection is usable again
        conn.begin().unwrap();
        conn.commit().unwrap();
    }

    #[test]
    fn rollback_after_external_rollback_resets_to_idle() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.begin().unwrap();
        conn.execute_batch("ROLLBACK").unwrap();
        conn.rollback().unwrap();
        assert_eq!(conn.state(), TxState::Idle);
    }

    #[test]
    fn forced_rollback_failure_fires_once() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.begin().unwrap();
        conn.force_rollback_failure_for_tests();

        assert!(conn.rollback().is_err());
        assert_eq!(conn.state(), TxState::InTransaction);
        conn.rollback().unwrap();
        assert_eq!(conn.state(), TxState::Idle);
    }
}
