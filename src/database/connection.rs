use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let manager = build_manager(SqliteConnectionManager::file(database_path));
    build_pool(manager, None)
}

/// Single-connection pool over a private in-memory database.
pub fn create_memory_pool() -> Result<DbPool> {
    let manager = build_manager(SqliteConnectionManager::memory());
    build_pool(manager, Some(1))
}

fn build_manager(manager: SqliteConnectionManager) -> SqliteConnectionManager {
    manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
}

fn build_pool(manager: SqliteConnectionManager, max_size: Option<u32>) -> Result<DbPool> {
    let mut builder = r2d2::Pool::builder();
    if let Some(size) = max_size {
        builder = builder.max_size(size);
    }

    builder
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
