//! Value quoting and identifier quoting.
//!
//! Literal escaping is delegated to an [`Escape`] implementation (normally the live
//! connection, whose escaping follows its charset). Identifier quoting never goes through
//! the escaper: identifiers are wrapped in backticks with embedded backticks doubled.

use crate::error::SqlEasyDbError;
use crate::types::{Fields, Value};

/// Charset-aware string escaping supplied by a connection.
pub trait Escape {
    /// Escape `raw` so it can sit between single quotes in a SQL literal.
    fn escape(&self, raw: &str) -> String;
}

impl<E: Escape + ?Sized> Escape for &E {
    fn escape(&self, raw: &str) -> String {
        (**self).escape(raw)
    }
}

/// Escaper applying the MySQL client library rules for ASCII-compatible charsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MysqlEscaper;

impl Escape for MysqlEscaper {
    fn escape(&self, raw: &str) -> String {
        mysql_escape(raw)
    }
}

/// Escape `\0`, `\n`, `\r`, `\\`, `'`, `"` and `\x1a` with a backslash.
#[must_use]
pub fn mysql_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\x1a' => out.push_str("\\Z"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote a table or column name: `` a`b `` becomes `` `a``b` ``.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for c in name.chars() {
        if c == '`' {
            out.push('`');
        }
        out.push(c);
    }
    out.push('`');
    out
}

/// Render a float with `.` as the decimal separator. Non-finite values become `NULL`.
#[must_use]
pub fn quote_float(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "NULL".to_string()
    }
}

/// Integer coercion used by `?i`: leading-number parse of text, truncation of floats.
///
/// # Errors
/// Returns `SqlEasyDbError::InvalidArgument` for arrays and mappings.
pub fn coerce_int(value: &Value) -> Result<i64, SqlEasyDbError> {
    match value {
        Value::Int(i) => Ok(*i),
        // `as` saturates and maps NaN to 0
        Value::Float(f) => Ok(*f as i64),
        Value::Null => Ok(0),
        Value::Text(s) => Ok(leading_int(s)),
        Value::Raw(expr) => Ok(leading_int(expr.as_str())),
        Value::Array(_) | Value::Map(_) => Err(SqlEasyDbError::invalid_argument(format!(
            "?i expects a scalar value, got {}",
            value.kind()
        ))),
    }
}

/// Float coercion used by `?f`.
///
/// # Errors
/// Returns `SqlEasyDbError::InvalidArgument` for arrays and mappings.
pub fn coerce_float(value: &Value) -> Result<f64, SqlEasyDbError> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        Value::Null => Ok(0.0),
        Value::Text(s) => Ok(leading_float(s)),
        Value::Raw(expr) => Ok(leading_float(expr.as_str())),
        Value::Array(_) | Value::Map(_) => Err(SqlEasyDbError::invalid_argument(format!(
            "?f expects a scalar value, got {}",
            value.kind()
        ))),
    }
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }
    let digits_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let mut has_digits = idx > digits_start;
    if bytes.get(idx) == Some(&b'.') {
        let frac_start = idx + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if has_digits || end > frac_start {
            has_digits = true;
            idx = end;
        }
    }
    if has_digits && matches!(bytes.get(idx), Some(b'e' | b'E')) {
        let mut end = idx + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exp_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_start {
            idx = end;
        }
    }
    if has_digits { &s[..idx] } else { "" }
}

/// A fraction or exponent in the prefix counts (`"1e3"` is 1000); the result is truncated
/// toward zero and saturates at the `i64` bounds.
fn leading_int(s: &str) -> i64 {
    let prefix = numeric_prefix(s.trim_start());
    if prefix.is_empty() {
        return 0;
    }
    if prefix.bytes().all(|b| b.is_ascii_digit() || b == b'+' || b == b'-') {
        return prefix.parse::<i64>().unwrap_or_else(|_| {
            if prefix.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            }
        });
    }
    prefix.parse::<f64>().map_or(0, |f| f as i64)
}

fn leading_float(s: &str) -> f64 {
    numeric_prefix(s.trim_start())
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Quoting rules bound to one escaper.
#[derive(Debug, Clone, Copy)]
pub struct Quoter<E> {
    escaper: E,
}

impl<E: Escape> Quoter<E> {
    pub fn new(escaper: E) -> Self {
        Self { escaper }
    }

    /// Escaped text of a scalar value, without quotes (`?e`).
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` for arrays and mappings.
    pub fn escape_value(&self, value: &Value) -> Result<String, SqlEasyDbError> {
        Ok(self.escaper.escape(&value.scalar_text()?))
    }

    /// Single-quoted, escaped literal of a scalar value's text form.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` for arrays and mappings.
    pub fn quote_string(&self, value: &Value) -> Result<String, SqlEasyDbError> {
        Ok(format!("'{}'", self.escape_value(value)?))
    }

    /// Integers unquoted, NULL as `null`, expressions verbatim, everything else quoted.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` for arrays and mappings.
    pub fn quote_smart(&self, value: &Value) -> Result<String, SqlEasyDbError> {
        match value {
            Value::Int(i) => Ok(i.to_string()),
            Value::Null => Ok("null".to_string()),
            Value::Raw(expr) => Ok(expr.as_str().to_string()),
            _ => self.quote_string(value),
        }
    }

    /// Comma-joined list for `IN (...)`; an empty list renders `NULL`.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` for nested arrays or mappings.
    pub fn quote_array(&self, value: &Value) -> Result<String, SqlEasyDbError> {
        let items = match value {
            Value::Array(items) => items.as_slice(),
            Value::Map(_) => {
                return Err(SqlEasyDbError::invalid_argument(
                    "?a expects an array, got mapping",
                ));
            }
            scalar => std::slice::from_ref(scalar),
        };
        if items.is_empty() {
            return Ok("NULL".to_string());
        }
        let quoted = items
            .iter()
            .map(|item| match item {
                Value::Int(i) => Ok(i.to_string()),
                Value::Raw(expr) => Ok(expr.as_str().to_string()),
                other => self.quote_string(other),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quoted.join(","))
    }

    /// `` `col` = value `` pairs joined by `, `, values quoted with [`Quoter::quote_smart`].
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` if a value is an array or mapping.
    pub fn assignment_set(&self, fields: &Fields) -> Result<String, SqlEasyDbError> {
        let parts = fields
            .iter()
            .map(|(name, value)| Ok(format!("{} = {}", quote_identifier(name), self.quote_smart(value)?)))
            .collect::<Result<Vec<_>, SqlEasyDbError>>()?;
        Ok(parts.join(", "))
    }

    /// Equality conjunction for `WHERE`; NULL values compare with `IS NULL`.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` if a value is an array or mapping.
    pub fn where_clause(&self, conditions: &Fields) -> Result<String, SqlEasyDbError> {
        let parts = conditions
            .iter()
            .map(|(name, value)| {
                if value.is_null() {
                    Ok(format!("{} IS NULL", quote_identifier(name)))
                } else {
                    Ok(format!("{} = {}", quote_identifier(name), self.quote_smart(value)?))
                }
            })
            .collect::<Result<Vec<_>, SqlEasyDbError>>()?;
        Ok(parts.join(" AND "))
    }
}
