//! SQLite storage for users, trips and everything attached to a trip
//!
//! `create_pool` opens (or creates) the database file and upgrades its schema
//! before handing out connections. `create_memory_pool` gives tests the same
//! schema without touching disk. Queries go through [`Executor`] and the
//! [`Repository`] built on top of it.

pub mod executor;
pub mod models;
pub mod repository;
pub mod schema;

pub use executor::{Executor, RowMap, SqlValue, Statement};
pub use models::*;
pub use repository::Repository;
pub use schema::{initialize_database, SCHEMA_VERSION};

use crate::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound on concurrent connections to a database file
const MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits on a locked file before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn file_options(db_path: &Path) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);
    Ok(options)
}

async fn connect(options: SqliteConnectOptions, pool: SqlitePoolOptions) -> Result<SqlitePool> {
    pool.connect_with(options)
        .await
        .map_err(|e| AppError::Connection(e.to_string()))
}

/// Open the database file at `db_path`, creating it and its directory if needed.
///
/// The schema upgrade runs alone on one connection, which is closed before
/// the shared pool opens. No pooled connection can predate the upgrade.
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let upgrade = connect(
        file_options(db_path)?,
        SqlitePoolOptions::new().max_connections(1),
    )
    .await?;
    initialize_database(&upgrade).await?;
    upgrade.close().await;

    let pool = connect(
        file_options(db_path)?,
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS),
    )
    .await?;

    tracing::info!("Opened trip database at {}", db_path.display());
    Ok(pool)
}

/// A fresh, fully migrated database that lives only as long as the pool.
///
/// `:memory:` gives every connection its own empty database, so the pool
/// holds exactly one connection and never lets it expire.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = connect(
        options,
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None),
    )
    .await?;

    initialize_database(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_pool_creates_file_and_parent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("trips.db");

        let pool = create_pool(&db_path).await.unwrap();

        assert!(db_path.exists());

        let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_reopen_keeps_schema_version() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("trips.db");

        let pool = create_pool(&db_path).await.unwrap();
        pool.close().await;

        let pool = create_pool(&db_path).await.unwrap();
        assert_eq!(
            schema::current_version(&pool).await.unwrap(),
            SCHEMA_VERSION
        );

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_memory_pool_is_migrated() {
        let pool = create_memory_pool().await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(count, 0);
    }
}
