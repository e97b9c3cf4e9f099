//! Error types for database metadata and lifecycle operations.

use vellum_sql_core::InterpretError;

/// Errors that can occur while managing a database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A named schema does not exist in the collection.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    /// The database (or its connection) is disposed or otherwise unusable.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The connection string could not be parsed.
    #[error("invalid connection string: {0}")]
    ConnectionString(String),

    /// Driver error from the underlying database.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Statement interpretation failed.
    #[error("interpretation failed: {0}")]
    Interpret(#[from] InterpretError),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DbError>;
