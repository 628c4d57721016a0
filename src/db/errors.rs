use diesel::result::{DatabaseErrorKind, Error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Already exists: {0}")]
    Conflict(String),
    #[error("Order {0} has been paid and can no longer be changed")]
    OrderLocked(i32),
    #[error("Database error: {0}")]
    DatabaseError(#[from] Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
    #[error("Migration error: {0}")]
    MigrationError(String),
    #[error("Output error: {0}")]
    OutputError(#[from] std::io::Error),
}

impl RepositoryError {
    /// Maps a Diesel error for the entity `what`, turning constraint
    /// violations into the matching domain variant.
    pub fn from_diesel(e: Error, what: &str) -> Self {
        match e {
            Error::NotFound => RepositoryError::NotFound(what.to_string()),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                RepositoryError::Conflict(what.to_string())
            }
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                RepositoryError::ValidationError(format!("{what}: {}", info.message()))
            }
            other => RepositoryError::DatabaseError(other),
        }
    }
}
