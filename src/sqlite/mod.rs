// SQLite backend for the engine.
//
// - connector: opens a file or in-memory database and applies session pragmas
// - connection: the `Connection` implementation (single statements, batches, charset)
// - query: row extraction and driver error mapping

pub mod connection;
pub mod connector;
pub mod query;

pub use connection::SqliteConnection;
pub use connector::SqliteConnector;
pub use query::build_result_set;
