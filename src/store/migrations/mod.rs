//! Schema migration registry and executor.
//!
//! Migrations are applied in ascending version order inside one transaction.
//! The applied version is mirrored to `PRAGMA user_version`, so running them
//! again on an up-to-date database is a no-op.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{ContactError, Result};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: i64,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_contacts.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded in the database.
pub async fn current_version(pool: &SqlitePool) -> Result<i64> {
    let version = sqlx::query_scalar::<_, i64>("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

/// Applies all pending migrations.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query_scalar::<_, i64>("PRAGMA user_version")
        .fetch_one(&mut *tx)
        .await?;
    let latest = latest_version();

    if current > latest {
        return Err(ContactError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    if current == latest {
        debug!(version = current, "schema up to date");
        return Ok(());
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        sqlx::raw_sql(migration.sql).execute(&mut *tx).await?;

        let pragma = format!("PRAGMA user_version = {}", migration.version);
        sqlx::raw_sql(&pragma).execute(&mut *tx).await?;

        info!(version = migration.version, "applied schema migration");
    }
    tx.commit().await?;

    Ok(())
}
