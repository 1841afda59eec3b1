use tracing::{error, info, warn};

use sqlite_txn::prelude::*;
use sqlite_txn::schema::{create_users_table, insert_user};

use crate::args::DemoConfig;

/// Open, populate, commit, report, close. The connection is closed on every path.
///
/// Returns the number of users inserted.
pub(crate) fn run(config: &DemoConfig) -> Result<usize, SqlTxnError> {
    let mut conn = SqliteConnection::open(&config.sqlite)?;

    let outcome = populate(&mut conn, &config.users);
    match &outcome {
        Ok(count) => info!(users = count, "transaction committed"),
        Err(err) => {
            error!(error = %err, "run failed");
            if let Err(rollback) = conn.rollback() {
                warn!(error = %rollback, "rollback after failed run also failed");
            }
        }
    }

    report_transaction_status(Some(&conn));
    let closed = conn.close();
    if let Err(err) = &closed {
        error!(error = %err, "failed to close connection");
    }
    outcome.and_then(|count| closed.map(|()| count))
}

fn populate(conn: &mut SqliteConnection, users: &[(String, i64)]) -> Result<usize, SqlTxnError> {
    create_users_table(conn)?;
    for (name, age) in users {
        insert_user(conn, name, *age)?;
    }
    conn.commit()?;
    Ok(users.len())
}
