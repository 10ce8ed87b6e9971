//! Read-side queries over the synchronized snapshot, plus the manual
//! sync trigger. This layer never mutates the store itself; writes go
//! through the sync cycle only.

use std::sync::Arc;
use tracing::debug;

use crate::application::sync_service::SyncService;
use crate::domain::{Pokemon, PokemonRepository, QueryError, RankAttribute, SyncError, SyncReport};

pub struct PokemonService {
    repository: Arc<dyn PokemonRepository>,
    sync_service: Arc<SyncService>,
}

impl PokemonService {
    pub fn new(repository: Arc<dyn PokemonRepository>, sync_service: Arc<SyncService>) -> Self {
        Self {
            repository,
            sync_service,
        }
    }

    /// Top `num_pokemon` records by `attribute`, descending. Values below
    /// 1 are rejected before the store is ever queried.
    pub async fn top_by(
        &self,
        attribute: RankAttribute,
        num_pokemon: i64,
    ) -> Result<Vec<Pokemon>, QueryError> {
        if num_pokemon < 1 {
            return Err(QueryError::InvalidLimit(num_pokemon));
        }
        let limit = u32::try_from(num_pokemon).unwrap_or(u32::MAX);

        debug!(?attribute, limit, "ranking query");
        Ok(self.repository.top_by_attribute(attribute, limit).await?)
    }

    /// Trigger one sync cycle on demand. Same entry point the scheduler
    /// uses.
    pub async fn run_sync(&self) -> Result<SyncReport, SyncError> {
        self.sync_service.run_sync_cycle().await
    }

    pub async fn stored_count(&self) -> Result<u64, QueryError> {
        Ok(self.repository.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MemoryRepository, StubCatalog, StubResolver};
    use crate::domain::Pokemon;

    fn service_over(repository: Arc<MemoryRepository>) -> PokemonService {
        let sync_service = Arc::new(SyncService::new(
            Arc::new(StubCatalog::listing(&["pikachu"])),
            Arc::new(StubResolver::default()),
            Arc::clone(&repository) as Arc<dyn PokemonRepository>,
            1500,
            4,
        ));
        PokemonService::new(repository, sync_service)
    }

    async fn seed(repository: &MemoryRepository) {
        repository
            .upsert_all(&[
                Pokemon::new(25, "pikachu".to_string(), Some(60), Some(4), Some(112), "{}".to_string()),
                Pokemon::new(6, "charizard".to_string(), Some(905), Some(17), Some(240), "{}".to_string()),
                Pokemon::new(143, "snorlax".to_string(), Some(4600), Some(21), Some(189), "{}".to_string()),
            ])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn top_by_returns_ranked_records() {
        let repository = Arc::new(MemoryRepository::default());
        seed(&repository).await;
        let service = service_over(Arc::clone(&repository));

        let by_height = service.top_by(RankAttribute::Height, 2).await.unwrap();
        assert_eq!(by_height[0].name, "snorlax");
        assert_eq!(by_height[1].name, "charizard");

        let by_weight = service.top_by(RankAttribute::Weight, 1).await.unwrap();
        assert_eq!(by_weight[0].name, "snorlax");
    }

    #[tokio::test]
    async fn limits_below_one_never_reach_the_store() {
        let repository = Arc::new(MemoryRepository::default());
        let service = service_over(Arc::clone(&repository));

        for bad in [0, -1, -42] {
            let err = service.top_by(RankAttribute::Weight, bad).await.unwrap_err();
            assert!(matches!(err, QueryError::InvalidLimit(n) if n == bad));
        }
    }

    #[tokio::test]
    async fn manual_trigger_runs_a_cycle() {
        let repository = Arc::new(MemoryRepository::default());
        let service = service_over(Arc::clone(&repository));

        let report = service.run_sync().await.unwrap();
        assert_eq!(report.resolved, 1);
        assert_eq!(service.stored_count().await.unwrap(), 1);
    }
}
