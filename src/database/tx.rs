use super::Database;
use crate::connection::{Connection, Connector};
use crate::error::SqlEasyDbError;
use crate::tx_outcome::TxOutcome;

impl<C: Connector> Database<C> {
    /// Open a transaction.
    ///
    /// Nesting is not tracked locally: the server rejects a second begin (or silently commits
    /// the first one, depending on the backend).
    ///
    /// # Errors
    /// Returns the driver error if the transaction cannot be started.
    pub fn begin_transaction(&mut self) -> Result<(), SqlEasyDbError> {
        let sql = self.connection()?.begin_statement();
        self.execute_sql(sql).map(drop)
    }

    /// # Errors
    /// Returns the driver error if `COMMIT` fails.
    pub fn commit(&mut self) -> Result<(), SqlEasyDbError> {
        self.execute_sql("COMMIT").map(drop)
    }

    /// # Errors
    /// Returns the driver error if `ROLLBACK` fails.
    pub fn rollback(&mut self) -> Result<(), SqlEasyDbError> {
        self.execute_sql("ROLLBACK").map(drop)
    }

    /// Run `work` inside a transaction.
    ///
    /// Commits when `work` returns `Ok`, rolls back when it (or the commit) fails. The failure
    /// is not returned; it is logged and kept for [`Database::last_transaction_error`].
    ///
    /// # Errors
    /// Only failures of `START TRANSACTION` and `ROLLBACK` themselves are returned.
    pub fn transaction<T, F>(&mut self, work: F) -> Result<TxOutcome<T>, SqlEasyDbError>
    where
        F: FnOnce(&mut Self) -> Result<T, SqlEasyDbError>,
    {
        self.last_tx_error = None;
        self.begin_transaction()?;

        let failure = match work(self) {
            Ok(value) => match self.commit() {
                Ok(()) => return Ok(TxOutcome::Committed(value)),
                Err(err) => err,
            },
            Err(err) => err,
        };

        tracing::warn!(target: "sql_easydb::tx", error = %failure, "rolling back transaction");
        self.last_tx_error = Some(failure);
        self.rollback()?;
        Ok(TxOutcome::RolledBack)
    }

    /// Error that made the most recent [`Database::transaction`] roll back.
    #[must_use]
    pub fn last_transaction_error(&self) -> Option<&SqlEasyDbError> {
        self.last_tx_error.as_ref()
    }
}
