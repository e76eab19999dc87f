use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlEasyDbError {
    /// A placeholder token had no argument left to consume.
    #[error("Count of parameters doesn't correspond to the count of placeholders; Query = \"{template}\"")]
    ParamCount { template: String },

    /// The server rejected a statement.
    ///
    /// `statement` is the zero-based position inside a multi-statement batch, when the
    /// failing SQL came from `multi_query`.
    #[error("Error {code}: \"{message}\"; Query = \"{sql}\"")]
    Query {
        sql: String,
        code: i32,
        message: String,
        statement: Option<usize>,
    },

    #[error("Connection error {code}: {message}")]
    Connection { code: i32, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl SqlEasyDbError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// SQL text that caused the error, for errors raised while running a statement.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Query { sql, .. } => Some(sql),
            Self::ParamCount { template } => Some(template),
            _ => None,
        }
    }

    /// Server or driver error code; `0` when the error did not come from the server.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Query { code, .. } | Self::Connection { code, .. } => *code,
            _ => 0,
        }
    }

    /// Position of the failing statement inside a `multi_query` batch.
    #[must_use]
    pub fn statement_index(&self) -> Option<usize> {
        match self {
            Self::Query { statement, .. } => *statement,
            _ => None,
        }
    }
}
