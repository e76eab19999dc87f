//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::config::DatabaseConfig;
pub use crate::connection::{Connection, Connector};
pub use crate::database::Database;
pub use crate::error::SqlEasyDbError;
pub use crate::fields;
pub use crate::placeholder::substitute;
pub use crate::quote::{Escape, MysqlEscaper};
pub use crate::results::{AssocRow, CustomDbRow, ResultCursor, ResultSet};
pub use crate::tx_outcome::TxOutcome;
pub use crate::types::{Expression, Fields, RowValues, Value};

#[cfg(feature = "sqlite")]
pub use crate::exports::SqliteConnection;
#[cfg(feature = "sqlite")]
pub use crate::exports::SqliteConnector;
