//! Sync orchestration
//!
//! Drives one end-to-end synchronization cycle: list the catalog, fan
//! out detail resolution over a bounded worker pool, and hand the
//! collected records to the store in a single bulk upsert. Item-level
//! failures are dropped and counted; only a failed listing or a failed
//! store write aborts the cycle.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, warn};

use crate::domain::{
    CatalogClient, DetailResolver, ItemError, PokemonRepository, SyncError, SyncReport,
};

pub struct SyncService {
    catalog: Arc<dyn CatalogClient>,
    resolver: Arc<dyn DetailResolver>,
    repository: Arc<dyn PokemonRepository>,
    page_limit: u32,
    max_concurrent: usize,
    run_guard: Mutex<()>,
}

impl SyncService {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        resolver: Arc<dyn DetailResolver>,
        repository: Arc<dyn PokemonRepository>,
        page_limit: u32,
        max_concurrent: usize,
    ) -> Self {
        Self {
            catalog,
            resolver,
            repository,
            page_limit,
            max_concurrent: max_concurrent.max(1),
            run_guard: Mutex::new(()),
        }
    }

    /// Run one sync cycle. Safe to call repeatedly; a call that arrives
    /// while another cycle is in flight is rejected with
    /// [`SyncError::CycleInProgress`] instead of interleaving writes.
    pub async fn run_sync_cycle(&self) -> Result<SyncReport, SyncError> {
        let _slot = self
            .run_guard
            .try_lock()
            .map_err(|_| SyncError::CycleInProgress)?;

        info!(page_limit = self.page_limit, "sync cycle: listing catalog");
        let entries = self.catalog.fetch_catalog(self.page_limit).await?;
        let listed = entries.len();

        info!("sync cycle: resolving {listed} detail records");
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = Vec::with_capacity(listed);

        for entry in entries {
            let resolver = Arc::clone(&self.resolver);
            let semaphore = Arc::clone(&semaphore);

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| ItemError::fetch(&entry.url, "worker pool closed"))?;
                resolver.resolve_detail(&entry).await
            }));
        }

        let mut resolved = Vec::with_capacity(listed);
        let mut failed = 0usize;

        for result in join_all(tasks).await {
            match result {
                Ok(Ok(pokemon)) => resolved.push(pokemon),
                Ok(Err(e)) => {
                    failed += 1;
                    warn!("dropping catalog entry: {e}");
                }
                Err(e) => {
                    failed += 1;
                    warn!("detail resolution task failed: {e}");
                }
            }
        }

        info!("sync cycle: persisting {} records", resolved.len());
        self.repository
            .upsert_all(&resolved)
            .await
            .map_err(SyncError::StoreWrite)?;

        let report = SyncReport {
            listed,
            resolved: resolved.len(),
            failed,
        };
        info!(
            listed = report.listed,
            resolved = report.resolved,
            failed = report.failed,
            "sync cycle complete"
        );
        Ok(report)
    }
}
