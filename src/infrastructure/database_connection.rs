// Database connection and pool management
// This module handles SQLite database connections using sqlx

use anyhow::Result;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::Path;

use crate::infrastructure::config::DatabaseConfig;

pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        // Create database file directory if it doesn't exist
        let db_path = if config.url.starts_with("sqlite://") {
            config.url.trim_start_matches("sqlite://")
        } else if config.url.starts_with("sqlite:") {
            config.url.trim_start_matches("sqlite:")
        } else {
            config.url.as_str()
        };

        if db_path != ":memory:" {
            if let Some(parent) = Path::new(db_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            if !Path::new(db_path).exists() {
                std::fs::File::create(db_path)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<()> {
        let create_pokemons_sql = r#"
            CREATE TABLE IF NOT EXISTS pokemons (
                id TEXT PRIMARY KEY,
                poke_api_id INTEGER NOT NULL UNIQUE,
                name TEXT NOT NULL,
                weight INTEGER,
                height INTEGER,
                base_experience INTEGER,
                raw_json TEXT NOT NULL,
                last_synced_at DATETIME NOT NULL
            )
        "#;

        let create_indexes_sql = r#"
            CREATE INDEX IF NOT EXISTS idx_pokemons_weight ON pokemons (weight DESC);
            CREATE INDEX IF NOT EXISTS idx_pokemons_height ON pokemons (height DESC);
            CREATE INDEX IF NOT EXISTS idx_pokemons_base_experience ON pokemons (base_experience DESC);
        "#;

        sqlx::query(create_pokemons_sql).execute(&self.pool).await?;
        sqlx::query(create_indexes_sql).execute(&self.pool).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn connection_and_migration() -> Result<()> {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test.db");
        let config = DatabaseConfig {
            url: format!("sqlite:{}", db_path.display()),
            max_connections: 2,
        };

        let db = DatabaseConnection::new(&config).await?;
        assert!(!db.pool().is_closed());

        db.migrate().await?;

        let result =
            sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name='pokemons'")
                .fetch_optional(db.pool())
                .await?;
        assert!(result.is_some());

        // Migration is idempotent.
        db.migrate().await?;
        Ok(())
    }
}
