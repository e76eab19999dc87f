use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Connection settings for a [`crate::Database`].
///
/// Unset fields fall back to the defaults below, also when deserializing a partial document:
/// ```rust
/// use sql_easydb::DatabaseConfig;
///
/// let config = DatabaseConfig::default()
///     .with_dbname("shop")
///     .with_session_option("foreign_keys", "ON");
/// assert_eq!(config.host, "localhost");
/// assert_eq!(config.charset, "utf8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Database name; the `SQLite` backend treats it as a file path (`:memory:` allowed).
    pub dbname: String,
    pub charset: String,
    pub port: Option<u16>,
    pub socket: Option<String>,
    /// Backend session options applied right after connecting, in order.
    pub session_options: IndexMap<String, String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            username: "root".to_string(),
            password: String::new(),
            dbname: "testdb".to_string(),
            charset: "utf8".to_string(),
            port: None,
            socket: None,
            session_options: IndexMap::new(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    #[must_use]
    pub fn with_dbname(mut self, dbname: impl Into<String>) -> Self {
        self.dbname = dbname.into();
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    #[must_use]
    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    #[must_use]
    pub fn with_session_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.session_options.insert(name.into(), value.into());
        self
    }
}
