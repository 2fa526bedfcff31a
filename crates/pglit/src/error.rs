//! Error types for pglit

use thiserror::Error;

/// Result type alias for pglit operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for literal rendering, statement assembly and execution
#[derive(Debug, Error)]
pub enum OrmError {
    /// A value shape the literal serializer cannot render
    #[error("Serialization error for {type_name}: {message}")]
    Serialization {
        type_name: &'static str,
        message: String,
    },

    /// Identifier outside the safe `[A-Za-z_][A-Za-z0-9_]*` charset
    #[error("Identifier error: {0}")]
    Identifier(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure reported by a connection collaborator
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error raised by the PostgreSQL driver, kept intact
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl OrmError {
    /// Create a serialization error naming the offending value's type
    pub fn serialization(type_name: &'static str, message: impl Into<String>) -> Self {
        Self::Serialization {
            type_name,
            message: message.into(),
        }
    }

    /// Create an identifier error
    pub fn identifier(message: impl Into<String>) -> Self {
        Self::Identifier(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is an identifier error
    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Check if this error came from the connection (collaborator or driver)
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Query(_))
    }

    /// SQLSTATE reported by the server, if the driver produced one
    pub fn code(&self) -> Option<&tokio_postgres::error::SqlState> {
        match self {
            Self::Query(e) => e.code(),
            _ => None,
        }
    }
}
