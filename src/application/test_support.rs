//! In-memory stand-ins for the pipeline seams, shared by the application
//! layer unit tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::domain::{
    CatalogClient, CatalogEntry, DetailResolver, ItemError, Pokemon, PokemonRepository,
    RankAttribute, SyncError,
};

/// Fixed reference data: name -> (poke_api_id, weight, height, base_experience).
fn known_pokemon() -> HashMap<&'static str, (i64, i64, i64, i64)> {
    HashMap::from([
        ("pikachu", (25, 60, 4, 112)),
        ("charizard", (6, 905, 17, 240)),
        ("snorlax", (143, 4600, 21, 189)),
    ])
}

pub fn entry(name: &str) -> CatalogEntry {
    CatalogEntry::new(name, format!("https://pokeapi.test/api/v2/pokemon/{name}/"))
}

pub struct StubCatalog {
    pub entries: Vec<CatalogEntry>,
    pub available: bool,
}

impl StubCatalog {
    pub fn listing(names: &[&str]) -> Self {
        Self {
            entries: names.iter().map(|n| entry(n)).collect(),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            entries: Vec::new(),
            available: false,
        }
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn fetch_catalog(&self, _limit: u32) -> Result<Vec<CatalogEntry>, SyncError> {
        if !self.available {
            return Err(SyncError::upstream_unavailable("listing endpoint down"));
        }
        Ok(self.entries.clone())
    }
}

/// Resolves known names to fixed records; names in `failing` report a
/// fetch error instead.
#[derive(Default)]
pub struct StubResolver {
    pub failing: HashSet<String>,
}

impl StubResolver {
    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| (*n).to_string()).collect(),
        }
    }
}

#[async_trait]
impl DetailResolver for StubResolver {
    async fn resolve_detail(&self, entry: &CatalogEntry) -> Result<Pokemon, ItemError> {
        if self.failing.contains(&entry.name) {
            return Err(ItemError::fetch(&entry.url, "connection reset"));
        }
        let (id, weight, height, xp) = known_pokemon()
            .get(entry.name.as_str())
            .copied()
            .ok_or_else(|| ItemError::missing_field(&entry.url, "id"))?;
        Ok(Pokemon::new(
            id,
            entry.name.clone(),
            Some(weight),
            Some(height),
            Some(xp),
            format!(r#"{{"id":{id},"name":"{}"}}"#, entry.name),
        ))
    }
}

/// Upserting in-memory repository keyed on `poke_api_id`, mirroring the
/// SQLite implementation's contract.
#[derive(Default)]
pub struct MemoryRepository {
    pub rows: Mutex<HashMap<i64, Pokemon>>,
    pub upsert_calls: AtomicUsize,
    pub fail_writes: bool,
}

impl MemoryRepository {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn upsert_call_count(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PokemonRepository for MemoryRepository {
    async fn upsert_all(&self, pokemons: &[Pokemon]) -> Result<()> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            anyhow::bail!("disk full");
        }
        let mut rows = self.rows.lock().await;
        for pokemon in pokemons {
            let mut record = pokemon.clone();
            if let Some(existing) = rows.get(&pokemon.poke_api_id) {
                record.id = existing.id.clone();
            }
            rows.insert(record.poke_api_id, record);
        }
        Ok(())
    }

    async fn top_by_attribute(&self, attribute: RankAttribute, limit: u32) -> Result<Vec<Pokemon>> {
        if limit < 1 {
            anyhow::bail!("limit must be >= 1, got {limit}");
        }
        let rows = self.rows.lock().await;
        let mut all: Vec<Pokemon> = rows.values().cloned().collect();
        let key = |p: &Pokemon| match attribute {
            RankAttribute::Weight => p.weight,
            RankAttribute::Height => p.height,
            RankAttribute::BaseExperience => p.base_experience,
        };
        // None sorts last, ties break on ascending poke_api_id.
        all.sort_by(|a, b| {
            key(b)
                .cmp(&key(a))
                .then_with(|| a.poke_api_id.cmp(&b.poke_api_id))
        });
        all.truncate(limit as usize);
        Ok(all)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.rows.lock().await.len() as u64)
    }
}
