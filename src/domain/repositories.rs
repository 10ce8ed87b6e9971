//! Repository interface for the synchronized Pokemon store.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::pokemon::{Pokemon, RankAttribute};

/// Persistence contract consumed by the sync pipeline and the read path.
///
/// `upsert_all` is keyed on `poke_api_id`: a record that already exists is
/// updated in place (its internal `id` is preserved), so repeated syncs
/// never create duplicate rows. The whole batch is written in a single
/// transaction; a failed call leaves the store unchanged.
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    async fn upsert_all(&self, pokemons: &[Pokemon]) -> Result<()>;

    /// Top `limit` records ordered descending by `attribute`. Ties are
    /// broken by ascending `poke_api_id` so the order is stable.
    /// `limit` must be >= 1.
    async fn top_by_attribute(&self, attribute: RankAttribute, limit: u32) -> Result<Vec<Pokemon>>;

    async fn count(&self) -> Result<u64>;
}
