use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};
use uuid::Uuid;

/// Document store backed by a single SQLite database; implements every repository trait.
#[derive(Clone)]
pub struct SqliteStore {
    pub(super) pool: Arc<Pool<Sqlite>>,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = if database_url.starts_with("sqlite::memory:") {
            // Each in-memory connection is its own database; keep exactly one alive.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().max_connections(5).connect_with(options).await?
        };
        Ok(Self { pool: Arc::new(pool) })
    }

    pub async fn init(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&*self.pool).await?;
        }
        tracing::debug!("schema ready");
        Ok(())
    }
}

const SCHEMA: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS user_tokens (
        token TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        access TEXT NOT NULL DEFAULT 'auth',
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY,
        name TEXT,
        description TEXT,
        creation_date TEXT NOT NULL,
        creator_id TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tasks (
        id TEXT PRIMARY KEY,
        name TEXT,
        description TEXT,
        start_date TEXT,
        is_paused INTEGER NOT NULL DEFAULT 1,
        elapsed_time INTEGER,
        estimated_time TEXT NOT NULL DEFAULT '00:00:00',
        creator_id TEXT NOT NULL,
        project_id TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS todos (
        id TEXT PRIMARY KEY,
        text TEXT NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0,
        completed_at TEXT,
        creator_id TEXT NOT NULL
    )",
];

pub(super) fn uuid_at(row: &SqliteRow, column: &str) -> Result<Uuid> {
    let raw: String = row.try_get(column)?;
    Ok(Uuid::parse_str(&raw)?)
}

pub(super) fn instant_at(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.try_get(column)?;
    Ok(DateTime::parse_from_rfc3339(&raw)?.with_timezone(&Utc))
}

pub(super) fn optional_instant_at(row: &SqliteRow, column: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.try_get(column)?;
    match raw {
        Some(s) => Ok(Some(DateTime::parse_from_rfc3339(&s)?.with_timezone(&Utc))),
        None => Ok(None),
    }
}

pub(super) fn flag_at(row: &SqliteRow, column: &str) -> Result<bool> {
    let raw: i64 = row.try_get(column)?;
    Ok(raw != 0)
}
