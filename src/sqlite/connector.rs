use crate::config::DatabaseConfig;
use crate::connection::Connector;
use crate::error::SqlEasyDbError;

use super::connection::SqliteConnection;
use super::query::error_parts;

/// Opens `config.dbname` as a `SQLite` database file (`:memory:` for a private in-memory one).
///
/// Host, credentials, port and socket have no meaning for `SQLite` and are ignored. Each
/// session option is applied as `PRAGMA <name> = <value>` right after opening.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnector;

impl Connector for SqliteConnector {
    type Conn = SqliteConnection;

    fn connect(&self, config: &DatabaseConfig) -> Result<SqliteConnection, SqlEasyDbError> {
        tracing::debug!(target: "sql_easydb::sqlite", path = %config.dbname, "opening sqlite database");
        let conn = rusqlite::Connection::open(&config.dbname).map_err(connection_error)?;

        for (name, value) in &config.session_options {
            conn.execute_batch(&format!("PRAGMA {name} = {value}"))
                .map_err(connection_error)?;
        }

        Ok(SqliteConnection::new(conn))
    }
}

fn connection_error(err: rusqlite::Error) -> SqlEasyDbError {
    let (code, message) = error_parts(&err);
    SqlEasyDbError::Connection { code, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Connection;

    #[test]
    fn session_options_become_pragmas() {
        let config = DatabaseConfig::default()
            .with_dbname(":memory:")
            .with_session_option("user_version", "7");
        let mut conn = SqliteConnector.connect(&config).unwrap();
        let rs = conn.execute("PRAGMA user_version").unwrap();
        assert_eq!(rs.results[0].get_by_index(0).and_then(|v| v.as_int()), Some(&7));
    }

    #[test]
    fn unreachable_path_is_a_connection_error() {
        let config = DatabaseConfig::default().with_dbname("/nonexistent-dir/sub/db.sqlite");
        let err = SqliteConnector.connect(&config).unwrap_err();
        assert!(matches!(err, SqlEasyDbError::Connection { .. }));
        assert_ne!(err.code(), 0);
    }
}
