use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::error::SqlEasyDbError;

/// Ordered column name → value mapping used for `SET` clauses, `WHERE` conjunctions and `?u`.
pub type Fields = IndexMap<String, Value>;

/// A trusted SQL fragment (for example `NOW()`), inserted verbatim wherever it appears.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression(String);

impl Expression {
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Values that can be bound to placeholders in a template.
///
/// The variant decides how a value is quoted, so pick it at the call site rather than
/// relying on the contents of a string:
/// ```rust
/// use sql_easydb::prelude::*;
///
/// let args = vec![
///     Value::Int(1),
///     Value::from("alice"),
///     Value::Raw(Expression::new("NOW()")),
///     Value::from(vec![1, 2, 3]),
/// ];
/// # let _ = args;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value (64-bit), rendered unquoted
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text value, always rendered as an escaped literal
    Text(String),
    /// NULL value
    Null,
    /// Pre-trusted SQL fragment
    Raw(Expression),
    /// List of values, for `?a`
    Array(Vec<Value>),
    /// Column → value mapping, for `?u`
    Map(Fields),
}

impl Value {
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(Expression::new(sql))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::Null => "null",
            Self::Raw(_) => "expression",
            Self::Array(_) => "array",
            Self::Map(_) => "mapping",
        }
    }

    /// Text form of a scalar value, the way it reads inside a string literal.
    pub(crate) fn scalar_text(&self) -> Result<Cow<'_, str>, SqlEasyDbError> {
        match self {
            Self::Int(i) => Ok(Cow::Owned(i.to_string())),
            Self::Float(f) => Ok(Cow::Owned(f.to_string())),
            Self::Text(s) => Ok(Cow::Borrowed(s)),
            Self::Null => Ok(Cow::Borrowed("")),
            Self::Raw(expr) => Ok(Cow::Borrowed(expr.as_str())),
            Self::Array(_) | Self::Map(_) => Err(SqlEasyDbError::invalid_argument(format!(
                "expected a scalar value, got {}",
                self.kind()
            ))),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Expression> for Value {
    fn from(v: Expression) -> Self {
        Value::Raw(v)
    }
}

impl From<Fields> for Value {
    fn from(v: Fields) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<RowValues> for Value {
    fn from(v: RowValues) -> Self {
        match v {
            RowValues::Int(i) => Value::Int(i),
            RowValues::Float(f) => Value::Float(f),
            RowValues::Text(s) => Value::Text(s),
            RowValues::Blob(b) => Value::Text(String::from_utf8_lossy(&b).into_owned()),
            RowValues::Null => Value::Null,
        }
    }
}

/// Build a [`Fields`] mapping with insertion order preserved.
///
/// ```rust
/// use sql_easydb::fields;
///
/// let row = fields! { "code" => "003", "order" => 1 };
/// assert_eq!(row.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::Fields::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(fields.insert(::std::string::String::from($name), $crate::Value::from($value));)+
        fields
    }};
}

/// Values stored in a fetched database row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
    /// NULL value
    Null,
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Text form used when the value keys a map (`fetch_pairs`, `fetch_all_keyed`).
    ///
    /// NULL keys become the empty string.
    #[must_use]
    pub fn to_key(&self) -> String {
        match self {
            RowValues::Int(i) => i.to_string(),
            RowValues::Float(f) => f.to_string(),
            RowValues::Text(s) => s.clone(),
            RowValues::Blob(b) => String::from_utf8_lossy(b).into_owned(),
            RowValues::Null => String::new(),
        }
    }
}
