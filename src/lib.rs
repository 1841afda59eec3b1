//! Thin transaction wrapper over an embedded `SQLite` database.
//!
//! [`execute_transaction`] opens a transaction on an idle connection (or reuses the
//! open one), runs one statement, and rolls back automatically if it fails.
//! Committing is left to the caller, so several wrapped statements can be made
//! durable together.
//!
//! ```rust
//! use sqlite_txn::prelude::*;
//! use sqlite_txn::schema::{create_users_table, find_users_by_name, insert_user};
//!
//! # fn main() -> Result<(), SqlTxnError> {
//! let mut conn = SqliteConnection::open_in_memory()?;
//! assert_eq!(transaction_status(Some(&conn)), TxState::Idle);
//!
//! create_users_table(&mut conn)?;
//! insert_user(&mut conn, "John", 30)?;
//! assert_eq!(transaction_status(Some(&conn)), TxState::InTransaction);
//!
//! conn.commit()?;
//! assert_eq!(find_users_by_name(&conn, "John")?.len(), 1);
//! conn.close()
//! # }
//! ```

pub mod error;
pub mod prelude;
pub mod results;
pub mod schema;
pub mod sqlite;
pub mod status;
pub mod types;

pub use error::{FailureKind, SqlTxnError};
pub use results::{CustomDbRow, ResultSet};
pub use sqlite::{SqliteConnection, SqliteOptions, execute_transaction};
pub use status::{report_transaction_status, transaction_status};
pub use types::{RowValues, TxState};
