use std::fmt;

use rusqlite::fallible_iterator::FallibleIterator;
use rusqlite::{Batch, Statement};

use crate::connection::Connection;
use crate::error::SqlEasyDbError;
use crate::quote::Escape;
use crate::results::ResultSet;

use super::query::{build_result_set, query_error};

/// A single `rusqlite` connection driven through textual SQL.
///
/// `SQLite` understands backtick identifiers, so the engine's quoting works unchanged, but the
/// MySQL-only statement forms (`INSERT ... SET`, `INSERT IGNORE`, `ON DUPLICATE KEY UPDATE`)
/// are rejected by the server. `multi_insert`, `update`, `delete` and all read helpers work.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
    last_insert_id: i64,
    affected_rows: u64,
}

impl SqliteConnection {
    pub(crate) fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn,
            last_insert_id: 0,
            affected_rows: 0,
        }
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::Connection` if `SQLite` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, SqlEasyDbError> {
        rusqlite::Connection::open_in_memory()
            .map(Self::new)
            .map_err(|err| {
                let (code, message) = super::query::error_parts(&err);
                SqlEasyDbError::Connection { code, message }
            })
    }

    /// Wrap an already opened `rusqlite` connection.
    #[must_use]
    pub fn from_rusqlite(conn: rusqlite::Connection) -> Self {
        Self::new(conn)
    }

    #[must_use]
    pub fn inner(&self) -> &rusqlite::Connection {
        &self.conn
    }

    fn run_statement(&mut self, sql: &str) -> Result<ResultSet, SqlEasyDbError> {
        let mut stmt = self.conn.prepare(sql)?;

        if stmt.column_count() > 0 {
            let result_set = build_result_set(&mut stmt)?;
            self.last_insert_id = 0;
            self.affected_rows = result_set.rows_affected as u64;
            return Ok(result_set);
        }

        let changed = stmt.execute([])?;
        drop(stmt);
        self.record_changes(changed, is_insert(sql));
        Ok(ResultSet::from_affected(changed))
    }

    /// The rowid is only meaningful right after an INSERT/REPLACE that wrote a row; SQLite
    /// keeps the previous value otherwise.
    fn record_changes(&mut self, changed: usize, inserted: bool) {
        self.affected_rows = changed as u64;
        self.last_insert_id = if inserted && changed > 0 {
            self.conn.last_insert_rowid()
        } else {
            0
        };
    }
}

/// Whether the statement text starts with `INSERT` or `REPLACE`, past leading comments.
fn is_insert(sql: &str) -> bool {
    let mut rest = sql.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail).trim_start();
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, tail)| tail).trim_start();
        } else {
            break;
        }
    }
    let keyword: String = rest
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect();
    keyword.eq_ignore_ascii_case("insert") || keyword.eq_ignore_ascii_case("replace")
}

/// Step a statement to completion, returning the change count for DML.
fn drain(stmt: &mut Statement) -> Result<usize, rusqlite::Error> {
    if stmt.column_count() == 0 {
        return stmt.execute([]);
    }
    let mut rows = stmt.query([])?;
    let mut count = 0;
    while rows.next()?.is_some() {
        count += 1;
    }
    Ok(count)
}

fn sqlite_encoding(charset: &str) -> Option<&'static str> {
    match charset.to_ascii_lowercase().as_str() {
        "utf8" | "utf8mb3" | "utf8mb4" | "utf-8" => Some("UTF-8"),
        "utf16" | "utf-16" => Some("UTF-16"),
        "utf16le" | "utf-16le" => Some("UTF-16le"),
        "utf16be" | "utf-16be" => Some("UTF-16be"),
        _ => None,
    }
}

impl Escape for SqliteConnection {
    fn escape(&self, raw: &str) -> String {
        raw.replace('\'', "''")
    }
}

impl Connection for SqliteConnection {
    fn execute(&mut self, sql: &str) -> Result<ResultSet, SqlEasyDbError> {
        self.run_statement(sql)
            .map_err(|err| query_error(sql, &err, None))
    }

    fn execute_multi(&mut self, sql: &str) -> Result<(), SqlEasyDbError> {
        let mut changed = 0;
        let mut inserted = false;
        {
            let mut batch = Batch::new(&self.conn, sql);
            let mut index = 0;
            loop {
                let mut stmt = match batch.next() {
                    Ok(Some(stmt)) => stmt,
                    Ok(None) => break,
                    Err(err) => {
                        return Err(query_error(sql, &SqlEasyDbError::from(err), Some(index)));
                    }
                };
                changed = drain(&mut stmt)
                    .map_err(|err| query_error(sql, &SqlEasyDbError::from(err), Some(index)))?;
                inserted = stmt.expanded_sql().is_some_and(|text| is_insert(&text));
                index += 1;
            }
        }

        self.record_changes(changed, inserted);
        Ok(())
    }

    fn last_insert_id(&self) -> i64 {
        self.last_insert_id
    }

    fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    fn set_charset(&mut self, charset: &str) -> Result<(), SqlEasyDbError> {
        let encoding = sqlite_encoding(charset)
            .ok_or_else(|| SqlEasyDbError::Config(format!("unsupported charset for SQLite: {charset}")))?;
        // Only takes effect before the database file has any content.
        self.conn
            .execute_batch(&format!("PRAGMA encoding = '{encoding}'"))?;
        Ok(())
    }

    fn begin_statement(&self) -> &'static str {
        "BEGIN"
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.conn.path())
            .field("last_insert_id", &self.last_insert_id)
            .field("affected_rows", &self.affected_rows)
            .finish()
    }
}
