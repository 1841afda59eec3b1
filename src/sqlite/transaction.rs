use tracing::{info, warn};

use crate::error::SqlTxnError;
use crate::types::RowValues;

use super::connection::SqliteConnection;
use super::params::Params;

/// Execute one statement inside the connection's transaction, opening it if needed.
///
/// An idle connection is moved into a transaction with `BEGIN` first; an open one
/// is reused, never nested. On success the transaction is left open for the
/// caller to commit. On failure the transaction is rolled back before the error
/// is returned, so the connection is always `Idle` after an `Err` from the
/// statement itself.
///
/// `params` of `None` or an empty slice runs the statement with no bindings.
///
/// # Errors
/// - `SqlTxnError::SqliteError` if `BEGIN` fails; nothing was executed.
/// - `SqlTxnError::Execution` if the statement fails; the transaction was rolled back.
/// - `SqlTxnError::RollbackFailed` if the statement fails and the rollback fails too.
pub fn execute_transaction(
    conn: &mut SqliteConnection,
    query: &str,
    params: Option<&[RowValues]>,
) -> Result<usize, SqlTxnError> {
    if !conn.in_transaction() {
        conn.begin()?;
    }

    let converted = params.map(Params::convert).unwrap_or_default();
    match conn.execute_dml_raw(query, &converted) {
        Ok(affected) => {
            info!(rows = affected, "statement executed");
            Ok(affected)
        }
        Err(source) => {
            warn!(error = %source, sql = query, "statement failed; rolling back");
            match conn.rollback_inner() {
                Ok(()) => Err(SqlTxnError::Execution {
                    sql: query.to_owned(),
                    source,
                }),
                Err(rollback) => {
                    warn!(error = %rollback, "rollback after failed statement also failed");
                    Err(SqlTxnError::RollbackFailed {
                        sql: query.to_owned(),
                        source,
                        rollback,
                    })
                }
            }
        }
    }
}

impl SqliteConnection {
    /// Method form of [`execute_transaction`].
    ///
    /// # Errors
    /// See [`execute_transaction`].
    pub fn execute_in_transaction(
        &mut self,
        query: &str,
        params: Option<&[RowValues]>,
    ) -> Result<usize, SqlTxnError> {
        execute_transaction(self, query, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::types::TxState;

    fn conn_with_table() -> SqliteConnection {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL) STRICT")
            .unwrap();
        conn
    }

    #[test]
    fn reuses_open_transaction() {
        let mut conn = conn_with_table();
        let insert = "INSERT INTO t (v) VALUES (?1)";
        execute_transaction(&mut conn, insert, Some(&[RowValues::Int(1)])).unwrap();
        execute_transaction(&mut conn, insert, Some(&[RowValues::Int(2)])).unwrap();
        assert_eq!(conn.state(), TxState::InTransaction);
        conn.rollback().unwrap();

        let rs = conn.select("SELECT v FROM t", &[]).unwrap();
        assert!(rs.is_empty());
    }

    #[test]
    fn empty_params_run_without_bindings() {
        let mut conn = conn_with_table();
        let affected =
            execute_transaction(&mut conn, "INSERT INTO t (v) VALUES (5)", Some(&[])).unwrap();
        assert_eq!(affected, 1);
    }

    #[test]
    fn not_null_violation_rolls_back_and_classifies() {
        let mut conn = conn_with_table();
        let err = execute_transaction(
            &mut conn,
            "INSERT INTO t (v) VALUES (?1)",
            Some(&[RowValues::Null]),
        )
        .unwrap_err();
        assert!(err.rolled_back());
        assert_eq!(err.failure_kind(), FailureKind::Constraint);
        assert_eq!(conn.state(), TxState::Idle);
    }

    #[test]
    fn syntax_error_is_malformed() {
        let mut conn = conn_with_table();
        let err = conn
            .execute_in_transaction("INSRT INTO t VALUES (1)", None)
            .unwrap_err();
        assert_eq!(err.failure_kind(), FailureKind::Malformed);
        assert!(!conn.in_transaction());
    }

    fn count(conn: &SqliteConnection) -> usize {
        conn.select("SELECT v FROM t", &[]).unwrap().len()
    }

    #[test]
    fn row_returning_statement_keeps_pending_work() {
        let mut conn = conn_with_table();
        let insert = "INSERT INTO t (v) VALUES (?1)";
        execute_transaction(&mut conn, insert, Some(&[RowValues::Int(1)])).unwrap();

        let affected = execute_transaction(&mut conn, "SELECT count(*) FROM t", None).unwrap();
        assert_eq!(affected, 0);
        let affected = execute_transaction(&mut conn, "PRAGMA user_version", None).unwrap();
        assert_eq!(affected, 0);
        assert_eq!(conn.state(), TxState::InTransaction);

        conn.commit().unwrap();
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn failure_in_reused_transaction_discards_all_pending_rows() {
        let mut conn = conn_with_table();
        let insert = "INSERT INTO t (v) VALUES (?1)";
        execute_transaction(&mut conn, insert, Some(&[RowValues::Int(1)])).unwrap();
        conn.commit().unwrap();

        execute_transaction(&mut conn, insert, Some(&[RowValues::Int(2)])).unwrap();
        execute_transaction(&mut conn, insert, Some(&[RowValues::Int(3)])).unwrap();
        assert_eq!(count(&conn), 3);

        let err = execute_transaction(&mut conn, insert, Some(&[RowValues::Text("x".into())]))
            .unwrap_err();
        assert_eq!(err.failure_kind(), FailureKind::TypeMismatch);
        assert_eq!(conn.state(), TxState::Idle);
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn failed_begin_leaves_connection_idle() {
        let mut conn = conn_with_table();
        // engine already inside a transaction the wrapper does not know about
        conn.execute_batch("BEGIN").unwrap();

        let err = execute_transaction(&mut conn, "INSERT INTO t (v) VALUES (1)", None)
            .unwrap_err();
        assert!(matches!(err, SqlTxnError::SqliteError(_)));
        assert!(!err.rolled_back());
        assert_eq!(conn.state(), TxState::Idle);

        conn.execute_batch("ROLLBACK").unwrap();
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn failed_rollback_reports_both_errors_and_stays_in_transaction() {
        let mut conn = conn_with_table();
        let insert = "INSERT INTO t (v) VALUES (?1)";
        execute_transaction(&mut conn, insert, Some(&[RowValues::Int(1)])).unwrap();
        conn.force_rollback_failure_for_tests();

        let err = execute_transaction(&mut conn, insert, Some(&[RowValues::Null])).unwrap_err();
        match &err {
            SqlTxnError::RollbackFailed { sql, rollback, .. } => {
                assert_eq!(sql, insert);
                assert_eq!(rollback.sqlite_error_code(), Some(rusqlite::ErrorCode::DatabaseBusy));
            }
            other => panic!("expected RollbackFailed, got {other:?}"),
        }
        assert_eq!(err.failure_kind(), FailureKind::Constraint);
        assert!(!err.rolled_back());
        assert_eq!(conn.state(), TxState::InTransaction);

        conn.rollback().unwrap();
        assert_eq!(count(&conn), 0);
    }
}
