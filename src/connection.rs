//! Seams to the physical database connection.
//!
//! The engine never talks to a driver directly: it composes SQL text and hands it to a
//! [`Connection`]. A [`Connector`] opens that connection from a [`DatabaseConfig`] the first
//! time a [`crate::Database`] needs it.

use crate::config::DatabaseConfig;
use crate::error::SqlEasyDbError;
use crate::quote::Escape;
use crate::results::ResultSet;

/// A live, single-session connection executing textual SQL.
///
/// Implementations report failures of `execute` and `execute_multi` as
/// `SqlEasyDbError::Query` carrying the failing SQL text and the server error code.
pub trait Connection: Escape {
    /// Run one statement. Statements without a result set return an empty `ResultSet`
    /// whose `rows_affected` holds the change count.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::Query` when the server rejects the statement.
    fn execute(&mut self, sql: &str) -> Result<ResultSet, SqlEasyDbError>;

    /// Run several `;`-separated statements, draining every result before moving on.
    ///
    /// Execution stops at the first failing statement, whose zero-based position is
    /// reported in the error's `statement` field. The connection stays usable afterwards.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::Query` for the first statement the server rejects.
    fn execute_multi(&mut self, sql: &str) -> Result<(), SqlEasyDbError>;

    /// Auto-increment id generated by the last INSERT, or 0 when there was none.
    fn last_insert_id(&self) -> i64;

    /// Rows changed by the last statement.
    fn affected_rows(&self) -> u64;

    /// Set the client character set used for escaping and for the session.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if the charset is unknown to the backend.
    fn set_charset(&mut self, charset: &str) -> Result<(), SqlEasyDbError>;

    /// Statement opening a transaction.
    fn begin_statement(&self) -> &'static str {
        "START TRANSACTION"
    }
}

/// Opens connections for a [`crate::Database`].
pub trait Connector {
    type Conn: Connection;

    /// Open a connection and apply the session options from `config`.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::Connection` if the handshake fails.
    fn connect(&self, config: &DatabaseConfig) -> Result<Self::Conn, SqlEasyDbError>;
}
