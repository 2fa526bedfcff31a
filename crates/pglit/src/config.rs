//! Adapter configuration.

use crate::literal::{EscapeStyle, LiteralSerializer};

/// Default server host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default server port.
pub const DEFAULT_PORT: u16 = 5432;
/// Session option that makes the server read `\'` and `\\` inside plain
/// string literals as escapes, matching [`EscapeStyle::Backslash`].
pub const BACKSLASH_SESSION_OPTIONS: &str = "-c standard_conforming_strings=off";

/// Connection parameters handed to the connection collaborator.
///
/// Defaults: `localhost:5432`, user from `$USER`, no password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub db: String,
    /// `None` leaves the user to the driver's own default.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Create a configuration for database `db` with defaults for everything else.
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db: db.into(),
            username: std::env::var("USER").ok().filter(|u| !u.is_empty()),
            password: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Convert into a `tokio_postgres` configuration.
    ///
    /// Carries no session options; open adapter connections from
    /// [`AdapterConfig::to_pg_config`] instead.
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config.host(&self.host).port(self.port).dbname(&self.db);
        if let Some(user) = &self.username {
            config.user(user);
        }
        if let Some(password) = &self.password {
            config.password(password);
        }
        config
    }
}

/// Configuration for [`Adapter`](crate::Adapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub connection: ConnectionConfig,
    /// How quotes are escaped inside string literals.
    pub escape_style: EscapeStyle,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_logged_sql: Option<usize>,
}

impl AdapterConfig {
    pub fn new(connection: ConnectionConfig) -> Self {
        Self {
            connection,
            escape_style: EscapeStyle::default(),
            max_logged_sql: Some(200),
        }
    }

    /// Set the escape style used for string literals.
    pub fn escape_style(mut self, style: EscapeStyle) -> Self {
        self.escape_style = style;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_logged_sql(mut self, len: usize) -> Self {
        self.max_logged_sql = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql = None;
        self
    }

    pub fn serializer(&self) -> LiteralSerializer {
        LiteralSerializer::new(self.escape_style)
    }

    /// Driver configuration for a connection that reads this adapter's
    /// literals correctly.
    ///
    /// With [`EscapeStyle::Backslash`] the session is started with
    /// `standard_conforming_strings=off`; servers default to `on`, where a
    /// backslash-escaped quote would end the literal.
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut config = self.connection.to_pg_config();
        if self.escape_style == EscapeStyle::Backslash {
            config.options(BACKSLASH_SESSION_OPTIONS);
        }
        config
    }
}
