use crate::error::SqlTxnError;
use crate::sqlite::params::Params;

use super::SqliteConnection;

impl SqliteConnection {
    /// Execute a batch of statements as-is, without touching the tracked state.
    ///
    /// Intended for setup outside the wrapper (pragmas, fixtures). A batch that
    /// ends an open transaction itself (`COMMIT`, `ROLLBACK`) leaves the tracked
    /// state behind; the next `commit` or `rollback` notices and resynchronizes.
    ///
    /// # Errors
    /// Returns `SqlTxnError` if executing the batch fails.
    pub fn execute_batch(&mut self, sql: &str) -> Result<(), SqlTxnError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Execute one statement and return rows affected. No transaction handling.
    ///
    /// Statements that yield rows (`SELECT`, most `PRAGMA`s) are stepped to
    /// completion and their rows discarded; they report zero rows affected.
    pub(crate) fn execute_dml_raw(
        &mut self,
        query: &str,
        params: &Params,
    ) -> Result<usize, rusqlite::Error> {
        let mut stmt = self.conn.prepare_cached(query)?;
        let refs = params.as_refs();
        if stmt.column_count() == 0 {
            return stmt.execute(&refs[..]);
        }
        let mut rows = stmt.query(&refs[..])?;
        while rows.next()?.is_some() {}
        Ok(0)
    }
}
