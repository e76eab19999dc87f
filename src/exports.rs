//! Backend-specific type exports.
//!
//! Conditional feature exports live here so `lib.rs` and the prelude stay backend-agnostic.

// SQLite exports
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteConnection;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteConnector;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::build_result_set as sqlite_build_result_set;
