#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! SQLite persistence for Leadbox.
//!
//! One [`Store`] over an `sqlx` pool, carrying two flat tables:
//! `contact_submissions` (write-once lead rows) and `sessions` (platform
//! session records owned by the host's auth handshake).
//!
//! The submissions table intentionally carries no UNIQUE constraint on
//! `email`; the duplicate check is an application-level read performed by
//! the submission handler before the insert.

mod sessions;
mod submissions;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use leadbox_core::Result;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS contact_submissions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT,
    questions   TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    id           TEXT PRIMARY KEY,
    shop         TEXT NOT NULL,
    state        TEXT,
    is_online    INTEGER NOT NULL DEFAULT 0,
    scope        TEXT,
    expires      TEXT,
    access_token TEXT,
    first_name   TEXT,
    last_name    TEXT,
    email        TEXT,
    locale       TEXT
);
";

/// SQLite-backed store for submissions and sessions.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Connects to the database at `url` (e.g. `sqlite://leadbox.db` or
    /// `sqlite::memory:`), creating the file and schema as needed.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // A :memory: database exists per connection; keep the pool at one
        // so the schema outlives the connection that created it.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("database schema ensured");
        Ok(())
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_memory_bootstraps_schema() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        // Schema statements are idempotent.
        store.ensure_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}/leadbox.db", dir.path().display());
        let store = Store::connect(&url).await.unwrap();
        drop(store);
        assert!(dir.path().join("leadbox.db").exists());
    }
}
