//! Placeholder-templated SQL over a single textual connection.
//!
//! Queries are written with typed placeholders (`?`, `?i`, `?s`, `?f`, `?e`, `?p`, `?a`,
//! `?u`) and rendered into SQL text with strict quoting, then sent through a [`Connection`].
//! Results come back as a buffered [`ResultCursor`] with assoc/row/column/pairs/keyed
//! fetches. [`Database`] adds CRUD helpers and a commit-or-rollback transaction wrapper.
//!
//! The SQL dialect is MySQL's. A `SQLite` backend ships behind the default `sqlite` feature;
//! other servers plug in through [`Connector`].

pub mod config;
pub mod connection;
pub mod crud;
pub mod database;
pub mod error;
pub mod exports;
pub mod placeholder;
pub mod prelude;
pub mod quote;
pub mod results;
pub mod tx_outcome;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::DatabaseConfig;
pub use connection::{Connection, Connector};
pub use crud::{build_delete, build_insert, build_insert_update, build_multi_insert, build_update};
pub use database::Database;
pub use error::SqlEasyDbError;
pub use placeholder::{PlaceholderMode, substitute};
pub use quote::{Escape, MysqlEscaper, Quoter, mysql_escape, quote_float, quote_identifier};
pub use results::{AssocRow, CustomDbRow, ResultCursor, ResultSet};
pub use tx_outcome::TxOutcome;
pub use types::{Expression, Fields, RowValues, Value};

#[cfg(feature = "sqlite")]
pub use exports::*;
