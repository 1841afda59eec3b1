use tracing::info;

use crate::sqlite::SqliteConnection;
use crate::types::TxState;

/// Current transaction state of `conn`; a missing connection counts as idle.
#[must_use]
pub fn transaction_status(conn: Option<&SqliteConnection>) -> TxState {
    conn.map_or(TxState::Idle, SqliteConnection::state)
}

/// Human-readable transaction status, also emitted as a log event.
#[must_use]
pub fn report_transaction_status(conn: Option<&SqliteConnection>) -> String {
    let state = transaction_status(conn);
    let message = format!("Transaction status: {state}");
    info!(state = %state, "{message}");
    message
}
