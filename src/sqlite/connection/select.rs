use crate::error::SqlTxnError;
use crate::results::ResultSet;
use crate::sqlite::params::Params;
use crate::sqlite::query::build_result_set;
use crate::types::RowValues;

use super::SqliteConnection;

impl SqliteConnection {
    /// Execute a SELECT and materialize into a `ResultSet`.
    ///
    /// Reads see uncommitted changes of this connection's open transaction.
    ///
    /// # Errors
    /// Returns `SqlTxnError` if preparing or executing the query fails.
    pub fn select(&self, query: &str, params: &[RowValues]) -> Result<ResultSet, SqlTxnError> {
        let converted = Params::convert(params);
        let mut stmt = self.conn.prepare(query)?;
        build_result_set(&mut stmt, &converted)
    }
}
