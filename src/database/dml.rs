use super::Database;
use crate::connection::{Connection, Connector};
use crate::crud::{build_delete, build_insert, build_insert_update, build_multi_insert, build_update};
use crate::error::SqlEasyDbError;
use crate::types::{Fields, Value};

impl<C: Connector> Database<C> {
    /// Insert one row.
    ///
    /// Returns the generated auto-increment id, or `None` when the driver reports no id
    /// (table without auto-increment column, or a row skipped by `INSERT IGNORE`).
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` for an empty field set and
    /// `SqlEasyDbError::Query` if the server rejects the statement.
    pub fn insert(
        &mut self,
        table: &str,
        fields: &Fields,
        ignore: bool,
    ) -> Result<Option<i64>, SqlEasyDbError> {
        let sql = self.compose(|conn| build_insert(table, fields, ignore, conn))?;
        self.execute_sql(&sql)?;
        let id = self.connection()?.last_insert_id();
        Ok((id != 0).then_some(id))
    }

    /// Update rows matching every `conditions` entry; empty conditions update the whole table.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` for an empty field set and
    /// `SqlEasyDbError::Query` if the server rejects the statement.
    pub fn update(
        &mut self,
        table: &str,
        fields: &Fields,
        conditions: &Fields,
    ) -> Result<u64, SqlEasyDbError> {
        let sql = self.compose(|conn| build_update(table, fields, conditions, conn))?;
        self.execute_sql(&sql)?;
        self.affected_rows()
    }

    /// Insert, or update on duplicate key. `update` defaults to the inserted fields.
    ///
    /// Returns the driver's affected-row count: 1 for an insert, 2 for an update.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` for empty field sets and
    /// `SqlEasyDbError::Query` if the server rejects the statement.
    pub fn insert_update(
        &mut self,
        table: &str,
        insert: &Fields,
        update: Option<&Fields>,
    ) -> Result<u64, SqlEasyDbError> {
        let update = update.unwrap_or(insert);
        let sql = self.compose(|conn| build_insert_update(table, insert, update, conn))?;
        self.execute_sql(&sql)?;
        self.affected_rows()
    }

    /// Insert many rows with one statement; each row lists values in `names` order.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::InvalidArgument` for empty input or ragged rows and
    /// `SqlEasyDbError::Query` if the server rejects the statement.
    pub fn multi_insert<N: AsRef<str>>(
        &mut self,
        table: &str,
        names: &[N],
        rows: &[Vec<Value>],
        ignore: bool,
    ) -> Result<u64, SqlEasyDbError> {
        let sql = self.compose(|conn| build_multi_insert(table, names, rows, ignore, conn))?;
        self.execute_sql(&sql)?;
        self.affected_rows()
    }

    /// Delete rows matching every `conditions` entry; empty conditions empty the table.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError::Query` if the server rejects the statement.
    pub fn delete(&mut self, table: &str, conditions: &Fields) -> Result<u64, SqlEasyDbError> {
        let sql = self.compose(|conn| build_delete(table, conditions, conn))?;
        self.execute_sql(&sql)?;
        self.affected_rows()
    }
}
