//! Device Config Storage
//!
//! `SQLite` persistence for the device registry.
//!
//! # Architecture
//!
//! - **Table per variant**: computers and displays live in their own tables,
//!   sharing one id space that is enforced on create
//! - **Vertical Slicing**: each variant owns its own queries
//! - **Scoped transactions**: every store operation runs on a
//!   [`SqliteDeviceTransaction`], rolled back unless committed
//!
//! # Example
//!
//! ```rust,no_run
//! use deviceconfig_core::DeviceService;
//! use deviceconfig_storage::{create_pool, run_migrations, SqliteDeviceStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://deviceconfig.db").await?;
//! run_migrations(&pool).await?;
//!
//! let service = DeviceService::new(Arc::new(SqliteDeviceStore::new(pool)));
//! let devices = service.find_all_devices().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod computers;
pub mod devices;
pub mod displays;

pub use context::{SqliteDeviceStore, SqliteDeviceTransaction};
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://deviceconfig.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    // Parse the URL into options so we can configure SQLite behavior
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true) // Create database file if it doesn't exist
        .journal_mode(SqliteJournalMode::Wal) // Use WAL mode for better concurrency
        .busy_timeout(std::time::Duration::from_secs(30)); // Wait up to 30s for locks

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("Pool created");

    Ok(pool)
}
