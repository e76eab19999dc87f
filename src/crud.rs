//! SQL text for the insert/update/upsert/delete helpers.
//!
//! Every table and column name goes through [`quote_identifier`]; every value goes through
//! smart quoting, so only [`crate::Expression`] values reach the SQL unescaped.

use crate::error::SqlEasyDbError;
use crate::quote::{Escape, Quoter, quote_identifier};
use crate::types::{Fields, Value};

fn require_fields(fields: &Fields, what: &str) -> Result<(), SqlEasyDbError> {
    if fields.is_empty() {
        Err(SqlEasyDbError::invalid_argument(format!(
            "{what} needs at least one field"
        )))
    } else {
        Ok(())
    }
}

fn ignore_keyword(ignore: bool) -> &'static str {
    if ignore { "INSERT IGNORE INTO" } else { "INSERT INTO" }
}

/// `INSERT [IGNORE] INTO <table> SET <fields>`
///
/// # Errors
/// Returns `SqlEasyDbError::InvalidArgument` for an empty field set or composite values.
pub fn build_insert<E: Escape>(
    table: &str,
    fields: &Fields,
    ignore: bool,
    escaper: E,
) -> Result<String, SqlEasyDbError> {
    require_fields(fields, "insert")?;
    let quoter = Quoter::new(escaper);
    Ok(format!(
        "{} {} SET {}",
        ignore_keyword(ignore),
        quote_identifier(table),
        quoter.assignment_set(fields)?
    ))
}

/// `UPDATE <table> SET <fields> [WHERE <conditions>]`; empty conditions touch every row.
///
/// # Errors
/// Returns `SqlEasyDbError::InvalidArgument` for an empty field set or composite values.
pub fn build_update<E: Escape>(
    table: &str,
    fields: &Fields,
    conditions: &Fields,
    escaper: E,
) -> Result<String, SqlEasyDbError> {
    require_fields(fields, "update")?;
    let quoter = Quoter::new(escaper);
    let mut sql = format!(
        "UPDATE {} SET {}",
        quote_identifier(table),
        quoter.assignment_set(fields)?
    );
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&quoter.where_clause(conditions)?);
    }
    Ok(sql)
}

/// `INSERT INTO <table> SET <insert> ON DUPLICATE KEY UPDATE <update>`
///
/// # Errors
/// Returns `SqlEasyDbError::InvalidArgument` for empty field sets or composite values.
pub fn build_insert_update<E: Escape>(
    table: &str,
    insert: &Fields,
    update: &Fields,
    escaper: E,
) -> Result<String, SqlEasyDbError> {
    require_fields(insert, "insert_update")?;
    require_fields(update, "insert_update")?;
    let quoter = Quoter::new(escaper);
    Ok(format!(
        "INSERT INTO {} SET {} ON DUPLICATE KEY UPDATE {}",
        quote_identifier(table),
        quoter.assignment_set(insert)?,
        quoter.assignment_set(update)?
    ))
}

/// `INSERT [IGNORE] INTO <table> (<names>) VALUES (...), (...)`
///
/// # Errors
/// Returns `SqlEasyDbError::InvalidArgument` when there are no names or rows, when a row's
/// length differs from the name list, or for composite values.
pub fn build_multi_insert<N: AsRef<str>, E: Escape>(
    table: &str,
    names: &[N],
    rows: &[Vec<Value>],
    ignore: bool,
    escaper: E,
) -> Result<String, SqlEasyDbError> {
    if names.is_empty() {
        return Err(SqlEasyDbError::invalid_argument(
            "multi_insert needs at least one field name",
        ));
    }
    if rows.is_empty() {
        return Err(SqlEasyDbError::invalid_argument(
            "multi_insert needs at least one row",
        ));
    }
    let quoter = Quoter::new(escaper);
    let columns = names
        .iter()
        .map(|name| quote_identifier(name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut tuples = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != names.len() {
            return Err(SqlEasyDbError::invalid_argument(format!(
                "multi_insert row {idx} has {} values for {} fields",
                row.len(),
                names.len()
            )));
        }
        let values = row
            .iter()
            .map(|value| quoter.quote_smart(value))
            .collect::<Result<Vec<_>, _>>()?;
        tuples.push(format!("({})", values.join(", ")));
    }

    Ok(format!(
        "{} {} ({}) VALUES {}",
        ignore_keyword(ignore),
        quote_identifier(table),
        columns,
        tuples.join(", ")
    ))
}

/// `DELETE FROM <table> [WHERE <conditions>]`
///
/// # Errors
/// Returns `SqlEasyDbError::InvalidArgument` for composite values.
pub fn build_delete<E: Escape>(
    table: &str,
    conditions: &Fields,
    escaper: E,
) -> Result<String, SqlEasyDbError> {
    let quoter = Quoter::new(escaper);
    let mut sql = format!("DELETE FROM {}", quote_identifier(table));
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&quoter.where_clause(conditions)?);
    }
    Ok(sql)
}
