//! Helper utilities for testing and development.

use std::sync::Arc;

use crate::results::{CustomDbRow, ResultSet};
use crate::types::RowValues;

/// Create a test row with the given column names and values.
#[must_use]
pub fn create_test_row(column_names: Vec<String>, values: Vec<RowValues>) -> CustomDbRow {
    CustomDbRow::new(Arc::new(column_names), values)
}

/// Build a buffered result set from literal columns and rows.
#[must_use]
pub fn create_result_set(columns: &[&str], rows: Vec<Vec<RowValues>>) -> ResultSet {
    let column_names: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
    let mut result_set = ResultSet::with_capacity(rows.len());
    result_set.set_column_names(Arc::new(column_names.clone()));
    for row in rows {
        result_set.add_row(create_test_row(column_names.clone(), row));
    }
    result_set
}
