//! The `users` table used by the demo and the integration tests.

use crate::error::SqlTxnError;
use crate::results::CustomDbRow;
use crate::sqlite::{SqliteConnection, execute_transaction};
use crate::types::RowValues;

/// `STRICT` makes SQLite reject a non-integer `age` instead of storing it as text.
pub const CREATE_USERS_SQL: &str = "CREATE TABLE IF NOT EXISTS users \
     (id INTEGER PRIMARY KEY, name TEXT, age INTEGER) STRICT";

pub const INSERT_USER_SQL: &str = "INSERT INTO users (name, age) VALUES (?1, ?2)";

const SELECT_USERS_SQL: &str = "SELECT id, name, age FROM users ORDER BY id";
const SELECT_USERS_BY_NAME_SQL: &str =
    "SELECT id, name, age FROM users WHERE name = ?1 ORDER BY id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl TryFrom<&CustomDbRow> for User {
    type Error = SqlTxnError;

    fn try_from(row: &CustomDbRow) -> Result<Self, Self::Error> {
        let id = row
            .get("id")
            .and_then(RowValues::as_int)
            .copied()
            .ok_or_else(|| SqlTxnError::RowShape("users row missing integer id".into()))?;
        let name = row.get("name").and_then(RowValues::as_text).map(str::to_owned);
        let age = row.get("age").and_then(RowValues::as_int).copied();
        Ok(User { id, name, age })
    }
}

/// Create the `users` table through the transaction wrapper, leaving the
/// transaction open for the caller to commit.
///
/// # Errors
/// Returns `SqlTxnError` if the DDL fails; the transaction was rolled back.
pub fn create_users_table(conn: &mut SqliteConnection) -> Result<(), SqlTxnError> {
    execute_transaction(conn, CREATE_USERS_SQL, None)?;
    Ok(())
}

/// Insert one user through the transaction wrapper.
///
/// # Errors
/// Returns `SqlTxnError` if the insert fails; the transaction was rolled back.
pub fn insert_user(conn: &mut SqliteConnection, name: &str, age: i64) -> Result<(), SqlTxnError> {
    let params = [RowValues::Text(name.to_owned()), RowValues::Int(age)];
    execute_transaction(conn, INSERT_USER_SQL, Some(&params))?;
    Ok(())
}

/// # Errors
/// Returns `SqlTxnError` if the query fails or a row is malformed.
pub fn all_users(conn: &SqliteConnection) -> Result<Vec<User>, SqlTxnError> {
    let rs = conn.select(SELECT_USERS_SQL, &[])?;
    rs.results.iter().map(User::try_from).collect()
}

/// # Errors
/// Returns `SqlTxnError` if the query fails or a row is malformed.
pub fn find_users_by_name(conn: &SqliteConnection, name: &str) -> Result<Vec<User>, SqlTxnError> {
    let rs = conn.select(SELECT_USERS_BY_NAME_SQL, &[RowValues::Text(name.to_owned())])?;
    rs.results.iter().map(User::try_from).collect()
}
