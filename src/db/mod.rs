pub mod enums;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryStore;
pub use store::ReviewStore;

use std::time::Duration;

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;

const SCHEMA_SQL: &str =
    include_str!("../../migrations/2025-11-01-000000_create_review_tables/up.sql");

/// Connect the bounded pool, failing fast when the database is unreachable.
pub fn connect(config: &DatabaseConfig) -> AppResult<DbPool> {
    let manager = DbConnectionManager::<PgConnection>::new(config.url.as_str());
    let pool = r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .idle_timeout(Some(Duration::from_secs(config.idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.max_lifetime)))
        .build(manager)?;
    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Create the review tables if they do not exist yet.
pub fn run_migrations(pool: &DbPool) -> AppResult<()> {
    let mut conn = pool.get()?;
    conn.batch_execute(SCHEMA_SQL)
        .map_err(|e| AppError::Config(format!("Failed to initialize schema: {}", e)))?;
    tracing::info!("Database schema is up to date");
    Ok(())
}
