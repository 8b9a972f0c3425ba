//! Embedded schema migrations and the destructive reset operation.

use diesel::{Connection, PgConnection, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{DbError, DbResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// ## Summary
/// Runs all pending migrations against the given database URL.
///
/// Uses a dedicated synchronous connection; call from `spawn_blocking` in
/// async contexts.
///
/// ## Errors
/// Returns an error if the connection cannot be established or a migration
/// fails.
pub fn run_migrations(database_url: &str) -> DbResult<()> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|e| DbError::MigrationError(format!("Failed to connect: {e}")))?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::MigrationError(format!("Failed to run migrations: {e}")))?;

    for version in &applied {
        tracing::info!(migration = %version, "Applied migration");
    }

    Ok(())
}

/// ## Summary
/// Drops the entire schema and rebuilds it from the embedded migrations.
///
/// Fully destructive: every collection and record is removed. Used only by
/// the admin reset operation to return the store to an empty state.
///
/// ## Errors
/// Returns an error if the schema cannot be dropped or the migrations fail.
pub fn reset_database(database_url: &str) -> DbResult<()> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|e| DbError::MigrationError(format!("Failed to connect: {e}")))?;

    tracing::warn!("Dropping entire database schema");

    diesel::sql_query("DROP SCHEMA public CASCADE").execute(&mut conn)?;
    diesel::sql_query("CREATE SCHEMA public").execute(&mut conn)?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::MigrationError(format!("Failed to run migrations: {e}")))?;

    tracing::info!("Database schema reset and migrations re-applied");

    Ok(())
}
