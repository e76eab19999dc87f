use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;

use crate::config::DatabaseConfig;
use crate::connection::{Connection, Connector};
use crate::error::SqlEasyDbError;
use crate::quote::{Escape, mysql_escape};
use crate::results::ResultSet;
use crate::types::RowValues;

use super::test_helpers::create_result_set;

/// One scripted answer to a statement.
#[derive(Debug, Clone)]
pub enum Reply {
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<RowValues>>,
    },
    Affected {
        rows: u64,
        insert_id: i64,
    },
    Error {
        code: i32,
        message: String,
    },
}

impl Reply {
    #[must_use]
    pub fn rows(columns: &[&str], rows: Vec<Vec<RowValues>>) -> Self {
        Reply::Rows {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
        }
    }

    #[must_use]
    pub fn affected(rows: u64) -> Self {
        Reply::Affected { rows, insert_id: 0 }
    }

    #[must_use]
    pub fn inserted(insert_id: i64) -> Self {
        Reply::Affected { rows: 1, insert_id }
    }

    #[must_use]
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Reply::Error {
            code,
            message: message.into(),
        }
    }
}

/// Connection that records SQL and replays scripted replies.
///
/// Statements without a scripted reply succeed with zero affected rows.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    executed: Vec<String>,
    replies: VecDeque<Reply>,
    charset: Option<String>,
    session_options: IndexMap<String, String>,
    last_insert_id: i64,
    affected_rows: u64,
}

impl RecordingConnection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every SQL string received so far, in order.
    #[must_use]
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    pub fn take_executed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.executed)
    }

    #[must_use]
    pub fn last_executed(&self) -> Option<&str> {
        self.executed.last().map(String::as_str)
    }

    pub fn push_reply(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    #[must_use]
    pub fn session_options(&self) -> &IndexMap<String, String> {
        &self.session_options
    }

    fn answer(&mut self, sql: &str, statement: Option<usize>) -> Result<ResultSet, SqlEasyDbError> {
        match self.replies.pop_front() {
            Some(Reply::Rows { columns, rows }) => {
                let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
                let result_set = create_result_set(&columns, rows);
                self.last_insert_id = 0;
                self.affected_rows = result_set.rows_affected as u64;
                Ok(result_set)
            }
            Some(Reply::Affected { rows, insert_id }) => {
                self.last_insert_id = insert_id;
                self.affected_rows = rows;
                Ok(ResultSet::from_affected(usize::try_from(rows).unwrap_or(usize::MAX)))
            }
            Some(Reply::Error { code, message }) => Err(SqlEasyDbError::Query {
                sql: sql.to_string(),
                code,
                message,
                statement,
            }),
            None => {
                self.last_insert_id = 0;
                self.affected_rows = 0;
                Ok(ResultSet::from_affected(0))
            }
        }
    }
}

impl Escape for RecordingConnection {
    fn escape(&self, raw: &str) -> String {
        mysql_escape(raw)
    }
}

impl Connection for RecordingConnection {
    fn execute(&mut self, sql: &str) -> Result<ResultSet, SqlEasyDbError> {
        self.executed.push(sql.to_string());
        self.answer(sql, None)
    }

    /// Splits on every `;`, quotes included; scripts should stick to plain statements.
    fn execute_multi(&mut self, sql: &str) -> Result<(), SqlEasyDbError> {
        let statements: Vec<&str> = sql
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        for (index, statement) in statements.into_iter().enumerate() {
            self.executed.push(statement.to_string());
            self.answer(statement, Some(index))?;
        }
        Ok(())
    }

    fn last_insert_id(&self) -> i64 {
        self.last_insert_id
    }

    fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    fn set_charset(&mut self, charset: &str) -> Result<(), SqlEasyDbError> {
        self.charset = Some(charset.to_string());
        Ok(())
    }
}

/// Connector producing [`RecordingConnection`]s preloaded with a reply script.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnector {
    replies: Vec<Reply>,
    failure: Option<(i32, String)>,
    connects: Arc<AtomicUsize>,
}

impl RecordingConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_replies(mut self, replies: impl IntoIterator<Item = Reply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Make every connection attempt fail with the given server error.
    #[must_use]
    pub fn failing(code: i32, message: impl Into<String>) -> Self {
        Self {
            failure: Some((code, message.into())),
            ..Self::default()
        }
    }

    /// How many times `connect` has been called, across clones.
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl Connector for RecordingConnector {
    type Conn = RecordingConnection;

    fn connect(&self, config: &DatabaseConfig) -> Result<RecordingConnection, SqlEasyDbError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if let Some((code, message)) = &self.failure {
            return Err(SqlEasyDbError::Connection {
                code: *code,
                message: message.clone(),
            });
        }
        let mut conn = RecordingConnection::new();
        conn.replies.extend(self.replies.iter().cloned());
        conn.session_options = config.session_options.clone();
        Ok(conn)
    }
}
