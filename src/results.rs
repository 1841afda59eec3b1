use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// A row from a query result, with access to both the column names and the values.
#[derive(Debug, Clone)]
pub struct CustomDbRow {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub rows: Vec<RowValues>,
    column_index_cache: Arc<HashMap<String, usize>>,
}

impl CustomDbRow {
    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }
}

/// Rows returned by a query, sharing one set of column names.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Number of rows collected
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index_cache: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index_cache: None,
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index_cache = Some(Arc::new(index_columns(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Add a row to the result set. Ignored until column names are set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let (Some(column_names), Some(cache)) = (&self.column_names, &self.column_index_cache)
        {
            self.results.push(CustomDbRow {
                column_names: Arc::clone(column_names),
                rows: row_values,
                column_index_cache: Arc::clone(cache),
            });
            self.rows_affected += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_before_column_names_are_dropped() {
        let mut rs = ResultSet::with_capacity(2);
        rs.add_row_values(vec![RowValues::Int(1)]);
        assert!(rs.is_empty());

        rs.set_column_names(Arc::new(vec!["id".into(), "name".into()]));
        rs.add_row_values(vec![RowValues::Int(1), RowValues::Text("John".into())]);
        assert_eq!(rs.len(), 1);
        assert_eq!(rs.rows_affected, 1);
        assert_eq!(rs.results[0].get("name").and_then(RowValues::as_text), Some("John"));
        assert!(rs.results[0].get("missing").is_none());
    }
}
