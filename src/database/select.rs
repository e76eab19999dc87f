use indexmap::IndexMap;

use super::Database;
use crate::connection::Connector;
use crate::error::SqlEasyDbError;
use crate::results::AssocRow;
use crate::types::{RowValues, Value};

impl<C: Connector> Database<C> {
    /// First cell of the first row, `None` when nothing matched.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if substitution or execution fails.
    pub fn get_one(
        &mut self,
        template: &str,
        args: &[Value],
    ) -> Result<Option<RowValues>, SqlEasyDbError> {
        Ok(self.query(template, args)?.fetch_one())
    }

    /// First row keyed by column name, `None` when nothing matched.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if substitution or execution fails.
    pub fn get_assoc(
        &mut self,
        template: &str,
        args: &[Value],
    ) -> Result<Option<AssocRow>, SqlEasyDbError> {
        let mut cursor = self.query(template, args)?;
        let row = cursor.fetch_assoc();
        cursor.free();
        Ok(row)
    }

    /// All rows keyed by column name.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if substitution or execution fails.
    pub fn get_all(&mut self, template: &str, args: &[Value]) -> Result<Vec<AssocRow>, SqlEasyDbError> {
        Ok(self.query(template, args)?.fetch_all())
    }

    /// First column of every row.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if substitution or execution fails.
    pub fn get_column(
        &mut self,
        template: &str,
        args: &[Value],
    ) -> Result<Vec<RowValues>, SqlEasyDbError> {
        Ok(self.query(template, args)?.fetch_column())
    }

    /// Column 0 → column 1 for every row.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if substitution or execution fails.
    pub fn get_pairs(
        &mut self,
        template: &str,
        args: &[Value],
    ) -> Result<IndexMap<String, RowValues>, SqlEasyDbError> {
        Ok(self.query(template, args)?.fetch_pairs())
    }

    /// Rows keyed by their first column, which is removed from each row.
    ///
    /// # Errors
    /// Returns `SqlEasyDbError` if substitution or execution fails.
    pub fn get_all_keyed(
        &mut self,
        template: &str,
        args: &[Value],
    ) -> Result<IndexMap<String, AssocRow>, SqlEasyDbError> {
        Ok(self.query(template, args)?.fetch_all_keyed())
    }
}
