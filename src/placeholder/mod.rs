//! Typed placeholder substitution.
//!
//! A template is scanned left to right; every `?` (optionally followed by one of
//! `i s f e p a u`) consumes the next argument and is replaced by its rendering.
//! Scanning does not skip quoted regions: a literal `?` inside the template is a token too.

mod scanner;

pub use scanner::PlaceholderMode;
use scanner::next_token;

use crate::error::SqlEasyDbError;
use crate::quote::{Escape, Quoter, coerce_float, coerce_int, quote_float};
use crate::types::Value;

/// Replace placeholders in `template` with `args`, escaping literals with `escaper`.
///
/// ```rust
/// use sql_easydb::prelude::*;
///
/// let sql = substitute(
///     "SELECT * FROM t WHERE a = ? OR b = ?i OR c IN (?a)",
///     &[Value::from("1"), Value::from("2"), Value::from(["3", "4"])],
///     MysqlEscaper,
/// )?;
/// assert_eq!(sql, "SELECT * FROM t WHERE a = '1' OR b = 2 OR c IN ('3','4')");
/// # Ok::<(), SqlEasyDbError>(())
/// ```
///
/// # Errors
/// Returns `SqlEasyDbError::ParamCount` when a token has no argument left, and
/// `SqlEasyDbError::InvalidArgument` when a composite value lands in a scalar position.
pub fn substitute<E: Escape>(
    template: &str,
    args: &[Value],
    escaper: E,
) -> Result<String, SqlEasyDbError> {
    let quoter = Quoter::new(escaper);
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut args = args.iter();
    let mut cursor = 0;

    while let Some(token) = next_token(bytes, cursor) {
        out.push_str(&template[cursor..token.start]);
        let value = args.next().ok_or_else(|| SqlEasyDbError::ParamCount {
            template: template.to_string(),
        })?;
        out.push_str(&render(&quoter, token.mode, value)?);
        cursor = token.end;
    }
    out.push_str(&template[cursor..]);

    Ok(out)
}

fn render<E: Escape>(
    quoter: &Quoter<E>,
    mode: PlaceholderMode,
    value: &Value,
) -> Result<String, SqlEasyDbError> {
    match mode {
        PlaceholderMode::Smart => quoter.quote_smart(value),
        PlaceholderMode::Int => Ok(coerce_int(value)?.to_string()),
        PlaceholderMode::Str => quoter.quote_string(value),
        PlaceholderMode::Float => Ok(quote_float(coerce_float(value)?)),
        PlaceholderMode::Escaped => quoter.escape_value(value),
        PlaceholderMode::Part => Ok(value.scalar_text()?.into_owned()),
        PlaceholderMode::Array => quoter.quote_array(value),
        PlaceholderMode::Assign => match value {
            Value::Map(fields) => quoter.assignment_set(fields),
            other => Err(SqlEasyDbError::invalid_argument(format!(
                "{} expects a mapping, got {}",
                mode.token(),
                other.kind()
            ))),
        },
    }
}
