pub mod operations;
pub mod schema;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::config::Config;
use crate::db::schema::{split_sql_statements, SCHEMA_SQL};

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(config: &Config) -> Result<Self, DbInitError> {
        let url = match &config.database_url {
            Some(url) => url.clone(),
            None => {
                let path = default_db_path();
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| DbInitError::Io(e.to_string()))?;
                }
                format!("sqlite:{}?mode=rwc", path.display())
            }
        };

        let in_memory = url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(&url)
            .map_err(DbInitError::Sqlx)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(30));

        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // An in-memory database lives inside a single connection; more than
        // one pooled connection would each see an independent empty store.
        let max_connections = if in_memory { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(DbInitError::Sqlx)?;

        let db = Self { pool };
        db.init_schema().await?;

        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<(), DbInitError> {
        for statement in split_sql_statements(SCHEMA_SQL) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(DbInitError::Sqlx)?;
        }
        Ok(())
    }
}

pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("com.flashdeck.app")
        .join("flashdeck.db")
}

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error("io error: {0}")]
    Io(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
