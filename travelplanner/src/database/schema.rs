//! Schema versioning
//!
//! The trip schema ships as numbered SQL scripts compiled into the binary.
//! `schema_version` records which scripts a database file has already run;
//! opening a database runs the rest, each inside its own transaction.

use crate::error::Result;
use sqlx::sqlite::SqlitePool;
use sqlx::{Sqlite, Transaction};

/// One numbered schema script
struct Migration {
    version: i64,
    name: &'static str,
    script: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial trip schema",
    script: include_str!("migrations/001_initial_schema.sql"),
}];

/// Latest version a freshly opened database ends up at
pub const SCHEMA_VERSION: i64 = 1;

/// Bring a database up to `SCHEMA_VERSION`.
///
/// `journal_mode = WAL` is requested here as well as in the connect options
/// so that pools built by hand get it too. SQLite answers `memory` for
/// `:memory:` databases and keeps going, so the same call is safe for tests.
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;
    // Per connection, not per file
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    let from = current_version(pool).await?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > from).collect();

    if pending.is_empty() {
        tracing::debug!("Schema is current at version {}", from);
        return Ok(());
    }

    tracing::info!(
        "Upgrading schema from version {} ({} script(s) pending)",
        from,
        pending.len()
    );

    for migration in pending {
        let mut tx = pool.begin().await?;
        run_script(&mut tx, migration).await?;
        tx.commit().await?;
        tracing::info!("Schema now at version {} ({})", migration.version, migration.name);
    }

    Ok(())
}

/// Highest applied version, 0 for an empty database
pub async fn current_version(pool: &SqlitePool) -> Result<i64> {
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

async fn run_script(tx: &mut Transaction<'_, Sqlite>, migration: &Migration) -> Result<()> {
    for statement in statements(migration.script) {
        sqlx::query(statement).execute(&mut **tx).await?;
    }

    sqlx::query("INSERT INTO schema_version (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Split a script on `;`, dropping pieces that hold only comments or whitespace.
///
/// Scripts must not put `;` inside string literals or trigger bodies.
fn statements(script: &str) -> impl Iterator<Item = &str> {
    script.split(';').filter(|piece| {
        piece
            .lines()
            .map(str::trim)
            .any(|line| !line.is_empty() && !line.starts_with("--"))
    })
}
