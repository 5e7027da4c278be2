/// Core error types for the shelf catalogue
use thiserror::Error;

/// Result type alias using `ShelfError`
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Core error type for the shelf catalogue
#[derive(Error, Debug)]
pub enum ShelfError {
    /// One or more required fields are missing or invalid.
    ///
    /// Every offending field is listed, not just the first.
    #[error("Missing or invalid fields: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    /// Well-formed request that cannot be applied
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Membership references a missing or foreign-owned entity
    #[error("Referential error: {0}")]
    Referential(String),

    /// Underlying storage failure; callers may retry
    #[error("Database error: {0}")]
    Database(String),

    /// Storage invariant violated
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ShelfError {
    /// Create a validation error from the offending field names
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a referential error
    pub fn referential(msg: impl Into<String>) -> Self {
        Self::Referential(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the failure came from the storage layer and may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ShelfError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::Storage("row unexpectedly missing".to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}
