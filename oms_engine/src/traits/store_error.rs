use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("We have an internal database engine error: {0}")]
    DatabaseError(String),
    #[error("A database constraint was violated: {0}")]
    ConstraintViolation(String),
    #[error("User error constructing query: {0}")]
    QueryError(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if !matches!(db.kind(), ErrorKind::Other) => {
                StoreError::ConstraintViolation(db.message().to_string())
            },
            _ => StoreError::DatabaseError(e.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::DatabaseError(format!("Could not run migrations: {e}"))
    }
}
