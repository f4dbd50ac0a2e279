//! Database connection from `database.*` settings.

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

/// Open the pool. An in-memory SQLite database lives in a single connection,
/// so the pool is pinned to one.
///
/// # Errors
/// Fails when the database cannot be reached.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.acquire_timeout(cfg.pool.acquire_timeout)
        .idle_timeout(cfg.pool.idle_timeout)
        .max_lifetime(cfg.pool.max_lifetime)
        .sqlx_logging(false);

    if is_in_memory(&cfg.dsn) {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(cfg.pool.max_conns)
            .min_connections(cfg.pool.min_conns);
    }

    let db = Database::connect(opts)
        .await
        .context("failed to connect to the database")?;
    info!(backend = ?db.get_database_backend(), "Database connected");
    Ok(db)
}

fn is_in_memory(dsn: &str) -> bool {
    dsn.starts_with("sqlite::memory:") || dsn.contains("mode=memory")
}
