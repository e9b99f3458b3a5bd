//! SQLite pools for database-backed tests.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Private in-memory database.
///
/// The pool holds a single connection that never idles out, so every query
/// sees the same database for the lifetime of the pool.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened.
pub async fn memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .context("failed to parse in-memory sqlite url")?;
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("failed to open in-memory sqlite database")
}

/// Connection URL for a database file inside `dir`, created on first connect.
#[must_use]
pub fn file_database_url(dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", dir.join("labels.db").display())
}
