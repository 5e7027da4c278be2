/// Storage-specific errors
use thiserror::Error;

/// Storage error types raised while opening or migrating the database
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for shelf_core::ShelfError {
    fn from(err: StorageError) -> Self {
        shelf_core::ShelfError::Database(err.to_string())
    }
}
