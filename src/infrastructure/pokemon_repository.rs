//! SQLite implementation of the Pokemon repository.
//!
//! The bulk upsert runs inside one transaction keyed on `poke_api_id`, so
//! a re-run updates rows in place and a failed batch leaves the store at
//! its pre-cycle state.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::{Pokemon, PokemonRepository, RankAttribute};

#[derive(Clone)]
pub struct SqlitePokemonRepository {
    pool: SqlitePool,
}

impl SqlitePokemonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PokemonRepository for SqlitePokemonRepository {
    async fn upsert_all(&self, pokemons: &[Pokemon]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for pokemon in pokemons {
            // The DO UPDATE clause leaves `id` untouched: the internal
            // identifier assigned at first insert survives later syncs.
            sqlx::query(
                r#"
                INSERT INTO pokemons
                (id, poke_api_id, name, weight, height, base_experience, raw_json, last_synced_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(poke_api_id) DO UPDATE SET
                    name = excluded.name,
                    weight = excluded.weight,
                    height = excluded.height,
                    base_experience = excluded.base_experience,
                    raw_json = excluded.raw_json,
                    last_synced_at = excluded.last_synced_at
                "#,
            )
            .bind(&pokemon.id)
            .bind(pokemon.poke_api_id)
            .bind(&pokemon.name)
            .bind(pokemon.weight)
            .bind(pokemon.height)
            .bind(pokemon.base_experience)
            .bind(&pokemon.raw_json)
            .bind(pokemon.last_synced_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn top_by_attribute(&self, attribute: RankAttribute, limit: u32) -> Result<Vec<Pokemon>> {
        if limit < 1 {
            anyhow::bail!("limit must be >= 1, got {limit}");
        }

        // The column name comes from the enum, never from caller input.
        let sql = format!(
            "SELECT id, poke_api_id, name, weight, height, base_experience, raw_json, last_synced_at \
             FROM pokemons ORDER BY {} DESC, poke_api_id ASC LIMIT ?",
            attribute.column_name()
        );

        let pokemons = sqlx::query_as::<_, Pokemon>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(pokemons)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pokemons")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}
