//! Fixed-cadence sync scheduling.
//!
//! A thin timer loop over the same `run_sync_cycle` entry point the
//! manual trigger uses. The scheduler never retries a failed cycle
//! early; the next attempt is the next tick.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::application::sync_service::SyncService;

pub struct SyncScheduler {
    service: Arc<SyncService>,
    period: Duration,
}

impl SyncScheduler {
    pub fn new(service: Arc<SyncService>, period: Duration) -> Result<Self> {
        if period.is_zero() {
            anyhow::bail!("sync interval must be > 0");
        }
        Ok(Self { service, period })
    }

    /// Run until `cancel` fires. The first cycle runs one full period
    /// after startup; there is no sync-on-boot.
    pub async fn run_loop(self, cancel: CancellationToken) {
        info!(period_secs = self.period.as_secs(), "sync scheduler started");
        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("sync scheduler stopped");
                    return;
                }
                _ = ticker.tick() => {
                    match self.service.run_sync_cycle().await {
                        Ok(report) => info!(
                            listed = report.listed,
                            resolved = report.resolved,
                            failed = report.failed,
                            "scheduled sync cycle finished"
                        ),
                        Err(e) => warn!(error = %e, "scheduled sync cycle failed"),
                    }
                }
            }
        }
    }
}
