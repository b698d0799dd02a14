use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::SettingsError;
use crate::backend::SettingsBackend;

const MIGRATIONS: &[(&str, &str)] = &[(
    "001_settings",
    include_str!("../migrations/001_settings.sql"),
)];

/// Create a SQLite connection pool with WAL mode enabled.
pub async fn connect(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    ensure_parent_dir(db_path)?;

    let opts = SqliteConnectOptions::from_str(db_path)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
}

/// Create the directory holding `db_path`. A bare file name has nothing to create.
fn ensure_parent_dir(db_path: &str) -> std::io::Result<()> {
    match Path::new(db_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Run forward-only migrations. Tracks applied migrations in a `_migrations` table.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_ts INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    for (name, sql) in MIGRATIONS {
        let applied: Option<(String,)> =
            sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                .bind(name)
                .fetch_optional(pool)
                .await?;

        if applied.is_some() {
            continue;
        }

        info!(migration = name, "applying migration");
        for statement in sql.split(';') {
            let trimmed = statement.trim();
            if trimmed.is_empty() {
                continue;
            }
            sqlx::query(trimmed).execute(pool).await?;
        }

        sqlx::query("INSERT INTO _migrations (name, applied_ts) VALUES (?, ?)")
            .bind(name)
            .bind(chrono::Utc::now().timestamp())
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Settings rows in the `settings(key, value)` table.
#[derive(Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect and migrate in one step.
    pub async fn open(db_path: &str) -> Result<Self, SettingsError> {
        let pool = connect(db_path).await?;
        migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(v,)| v))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_backend() -> SqliteBackend {
        // One connection so every query sees the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrate(&pool).await.unwrap();
        SqliteBackend::new(pool)
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        ensure_parent_dir("watchtonight.db").unwrap();
        ensure_parent_dir("sqlite::memory:").unwrap();
    }

    #[tokio::test]
    async fn connect_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("watchtonight-{}", std::process::id()));
        let db_path = dir.join("nested").join("settings.db");
        let db_path = db_path.to_string_lossy().into_owned();

        let pool = connect(&db_path).await.unwrap();
        migrate(&pool).await.unwrap();
        pool.close().await;

        assert!(Path::new(&db_path).exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn get_set_roundtrip_and_upsert() {
        let backend = memory_backend().await;
        assert_eq!(backend.get("watchtonight-theme").await.unwrap(), None);

        backend.set("watchtonight-theme", "light").await.unwrap();
        backend.set("watchtonight-theme", "dark").await.unwrap();
        assert_eq!(
            backend.get("watchtonight-theme").await.unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let backend = memory_backend().await;
        migrate(backend.pool()).await.unwrap();

        let applied: Vec<(String,)> = sqlx::query_as("SELECT name FROM _migrations")
            .fetch_all(backend.pool())
            .await
            .unwrap();
        assert_eq!(applied.len(), 1);
    }
}
