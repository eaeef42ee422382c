//! Error types for the travel planner
//!
//! All errors use thiserror for structured error handling.
//! Every error renders to a user-facing message and can be serialized
//! into a command response.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{service} request failed: {message}")]
    ExternalService {
        service: &'static str,
        message: String,
    },

    #[error("Write rejected by database: {0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Generic(String),
}

/// Coarse failure category, independent of the underlying cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorKind {
    ConnectionFailure,
    ValidationFailure,
    NotFound,
    ExternalServiceFailure,
    IntegrityFailure,
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn external(service: &'static str, message: impl Into<String>) -> Self {
        AppError::ExternalService {
            service,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Connection(_) => ErrorKind::ConnectionFailure,
            AppError::Validation(_) => ErrorKind::ValidationFailure,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::ExternalService { .. } => ErrorKind::ExternalServiceFailure,
            AppError::Integrity(_) => ErrorKind::IntegrityFailure,
            AppError::Database(_)
            | AppError::Io(_)
            | AppError::Serialization(_)
            | AppError::Generic(_) => ErrorKind::Internal,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                if db.is_unique_violation()
                    || db.is_foreign_key_violation()
                    || db.is_check_violation()
                {
                    AppError::Integrity(db.message().to_string())
                } else {
                    AppError::Database(sqlx::Error::Database(db))
                }
            }
            sqlx::Error::RowNotFound => AppError::not_found("Record", "no matching row"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::Connection(err.to_string())
            }
            sqlx::Error::Io(e) => AppError::Connection(e.to_string()),
            sqlx::Error::Tls(e) => AppError::Connection(e.to_string()),
            other => AppError::Database(other),
        }
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
