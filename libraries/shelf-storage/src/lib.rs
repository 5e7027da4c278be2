//! Shelf Storage
//!
//! Multi-user `SQLite` persistence for the shelf media catalogue.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity (`media`, `metadata`, `collections`,
//!   `memberships`) owns its own queries
//! - **Multi-User**: every media item and collection carries its owner's id
//! - **Join Table**: memberships live in `collection_media`; deleting either
//!   side removes the links in the same transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_storage::{LocalStorageContext, create_pool, run_migrations};
//! use shelf_core::storage::StorageContext;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://shelf.db", 5).await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//! let media = storage.list_media(1).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod collections;
pub mod media;
pub mod memberships;
pub mod metadata;

pub use context::LocalStorageContext;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before serving requests.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://shelf.db>`)
/// * `max_connections` - upper bound on pooled connections
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    tracing::info!(max_connections, "SQLite pool created");

    Ok(pool)
}

/// Current time in the format stored in `date_added` columns
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
