//! The `Database` facade: lazy connection, templated queries, read helpers, CRUD helpers
//! and transaction control.
//!
//! A `Database` owns exactly one connection and is meant to be driven from one thread at a
//! time; every method takes `&mut self` and blocks on the underlying connection.

mod dml;
mod select;
mod tx;

use std::fmt;

use crate::config::DatabaseConfig;
use crate::connection::{Connection, Connector};
use crate::error::SqlEasyDbError;
use crate::placeholder::substitute;
use crate::quote::Escape;
use crate::results::{ResultCursor, ResultSet};
use crate::types::Value;

pub struct Database<C: Connector> {
    config: DatabaseConfig,
    connector: C,
    conn: Option<C::Conn>,
    last_tx_error: Option<SqlEasyDbError>,
}

impl<C: Connector> Database<C> {
    /// Create a handle; nothing is opened until the first statement needs a connection.
    pub fn new(config: DatabaseConfig, connector: C) -> Self {
        Self {
            config,
            connector,
            conn: None,
            last_tx_error: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    #[must_use]
    pub fn connector(&self) -> &C {
        &self.connector
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// The live connection, opened on first use.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::Connection` if connecting fails, or the charset error if the
    /// configured charset cannot be applied.
    pub fn connection(&mut self) -> Result<&mut C::Conn, SqlEasyDbError> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                tracing::debug!(
                    target: "sql_easydb::connect",
                    host = %self.config.host,
                    dbname = %self.config.dbname,
                    "opening connection"
                );
                let mut conn = self.connector.connect(&self.config)?;
                conn.set_charset(&self.config.charset)?;
                conn
            }
        };
        Ok(self.conn.insert(conn))
    }

    /// Change the client character set of the live connection.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if connecting fails or the backend rejects the charset.
    pub fn set_charset(&mut self, charset: &str) -> Result<(), SqlEasyDbError> {
        self.connection()?.set_charset(charset)
    }

    /// Escape `raw` with the connection's rules, without adding quotes.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if connecting fails.
    pub fn escape(&mut self, raw: &str) -> Result<String, SqlEasyDbError> {
        Ok(self.connection()?.escape(raw))
    }

    /// Render `template` with `args` using the connection's escaping.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::ParamCount` when there are fewer arguments than placeholders.
    pub fn parse(&mut self, template: &str, args: &[Value]) -> Result<String, SqlEasyDbError> {
        let conn = self.connection()?;
        substitute(template, args, &*conn)
    }

    /// Execute SQL text as is, without placeholder substitution.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::Query` if the server rejects the statement.
    pub fn plain_query(&mut self, sql: &str) -> Result<ResultCursor, SqlEasyDbError> {
        self.execute_sql(sql).map(ResultCursor::new)
    }

    /// Substitute placeholders and execute the statement.
    ///
    /// ```rust
    /// # #[cfg(feature = "sqlite")]
    /// # fn demo() -> Result<(), sql_easydb::SqlEasyDbError> {
    /// use sql_easydb::prelude::*;
    ///
    /// let mut db = Database::new(DatabaseConfig::default().with_dbname(":memory:"), SqliteConnector);
    /// db.plain_query("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)")?;
    /// db.query("INSERT INTO t (name) VALUES (?)", &["Cup".into()])?;
    /// let name = db.query("SELECT name FROM t WHERE id = ?i", &[1.into()])?.fetch_one();
    /// assert_eq!(name, Some(RowValues::Text("Cup".into())));
    /// # Ok(())
    /// # }
    /// # #[cfg(feature = "sqlite")]
    /// # demo().unwrap();
    /// ```
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::ParamCount` for missing arguments and `SqlEasyDbError::Query`
    /// (carrying the rendered SQL) if the server rejects it.
    pub fn query(&mut self, template: &str, args: &[Value]) -> Result<ResultCursor, SqlEasyDbError> {
        let sql = self.parse(template, args)?;
        self.plain_query(&sql)
    }

    /// Execute several `;`-separated statements, draining every result.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::Query` for the first failing statement; its position is
    /// available through [`SqlEasyDbError::statement_index`].
    pub fn multi_query(&mut self, sql: &str) -> Result<(), SqlEasyDbError> {
        tracing::debug!(target: "sql_easydb::query", sql, "multi query");
        self.connection()?.execute_multi(sql)
    }

    /// Auto-increment id generated by the last INSERT, 0 if none.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if connecting fails.
    pub fn insert_id(&mut self) -> Result<i64, SqlEasyDbError> {
        Ok(self.connection()?.last_insert_id())
    }

    /// Rows changed by the last statement.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if connecting fails.
    pub fn affected_rows(&mut self) -> Result<u64, SqlEasyDbError> {
        Ok(self.connection()?.affected_rows())
    }

    pub(crate) fn execute_sql(&mut self, sql: &str) -> Result<ResultSet, SqlEasyDbError> {
        tracing::debug!(target: "sql_easydb::query", sql, "execute");
        let result = self.connection()?.execute(sql);
        if let Err(ref err) = result {
            tracing::debug!(target: "sql_easydb::query", error = %err, "statement failed");
        }
        result
    }

    /// Render SQL with the live connection as the escaper.
    pub(crate) fn compose<F>(&mut self, build: F) -> Result<String, SqlEasyDbError>
    where
        F: FnOnce(&C::Conn) -> Result<String, SqlEasyDbError>,
    {
        let conn = self.connection()?;
        build(conn)
    }
}

impl<C: Connector> fmt::Debug for Database<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("host", &self.config.host)
            .field("dbname", &self.config.dbname)
            .field("connected", &self.conn.is_some())
            .finish_non_exhaustive()
    }
}
