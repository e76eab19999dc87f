use std::sync::Arc;

use rusqlite::Statement;
use rusqlite::types::Value;

use crate::error::SqlEasyDbError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `SqlEasyDbError` if the value cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, SqlEasyDbError> {
    let value: Value = row.get(idx)?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(b) => Ok(RowValues::Blob(b)),
    }
}

/// Run a prepared row-returning statement and buffer every row.
///
/// `rows_affected` is set to the number of rows read.
///
/// # Errors
/// Returns `SqlEasyDbError` if stepping the statement or reading a value fails.
pub fn build_result_set(stmt: &mut Statement) -> Result<ResultSet, SqlEasyDbError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query([])?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    result_set.rows_affected = result_set.results.len();
    Ok(result_set)
}

/// Split a driver error into the (code, message) pair reported to callers.
pub(crate) fn error_parts(err: &rusqlite::Error) -> (i32, String) {
    match err {
        rusqlite::Error::SqliteFailure(failure, message) => (
            failure.extended_code,
            message.clone().unwrap_or_else(|| failure.to_string()),
        ),
        // syntax and name-resolution errors reported against a token of the input
        rusqlite::Error::SqlInputError { error, msg, .. } => (error.extended_code, msg.clone()),
        other => (0, other.to_string()),
    }
}

/// Wrap a driver error as a statement failure.
pub(crate) fn query_error(sql: &str, err: &SqlEasyDbError, statement: Option<usize>) -> SqlEasyDbError {
    let (code, message) = match err {
        SqlEasyDbError::Sqlite(inner) => error_parts(inner),
        other => (other.code(), other.to_string()),
    };
    SqlEasyDbError::Query {
        sql: sql.to_string(),
        code,
        message,
        statement,
    }
}
