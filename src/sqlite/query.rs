use std::sync::Arc;

use rusqlite::Statement;

use crate::error::SqlTxnError;
use crate::results::ResultSet;

use super::params::{Params, sqlite_value_to_row_value};

/// Run a prepared query and collect every row into a `ResultSet`.
///
/// # Errors
/// Returns `SqlTxnError::SqliteError` if query execution or value extraction fails.
pub fn build_result_set(stmt: &mut Statement, params: &Params) -> Result<ResultSet, SqlTxnError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query(&params.as_refs()[..])?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            let value: rusqlite::types::Value = row.get(i)?;
            row_values.push(sqlite_value_to_row_value(value));
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
