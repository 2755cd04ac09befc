//! Postgres access layer for the HR platform.
//!
//! Exposes the connection pool, entity models, and per-table
//! repositories. Migrations live at `db/migrations` in the repository
//! root and are embedded via [`migrate`].

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool alias used across the workspace.
pub type DbPool = PgPool;

/// Default pool size; small because every dispatch is a short burst of
/// point queries.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while constructing the pool.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connect to the database named by `DATABASE_URL`.
///
/// A `.env` file in the working directory is honored when present.
pub async fn connect_from_env() -> Result<DbPool, DbError> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").map_err(|_| DbError::MissingDatabaseUrl)?;
    Ok(connect(&url).await?)
}

/// Connect to the database at the given URL.
pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(max_connections = DEFAULT_MAX_CONNECTIONS, "Connecting to Postgres");
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Run all pending migrations.
pub async fn migrate(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Lightweight connectivity check.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
