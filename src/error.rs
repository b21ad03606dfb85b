//! Unified error types for the API service.

use strum::Display;
use thiserror::Error;

/// Unified error type for service startup and operation.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Prometheus recorder installation error.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Resource kinds exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    /// Skating element category.
    Category,
    /// Skating element.
    Element,
}

/// Repository errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row matched the identifier, either on lookup or on a write.
    #[error("{resource} not found")]
    NotFound {
        /// Resource that was looked up.
        resource: Resource,
        /// Identifier that matched nothing.
        id: i32,
    },

    /// The store rejected a write because of a constraint (foreign key,
    /// unique, check or not-null).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Any other store failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "not_found",
            StoreError::Constraint(_) => "constraint",
            StoreError::Database(_) => "database",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            use sqlx::error::ErrorKind;
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation => {
                    return StoreError::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type returned by repositories and services.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
