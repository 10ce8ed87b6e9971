//! Service layer traits for the two upstream-facing stages of a sync
//! cycle. Splitting listing from detail resolution keeps the orchestrator
//! testable against stub implementations.

use async_trait::async_trait;

use crate::domain::errors::{ItemError, SyncError};
use crate::domain::pokemon::{CatalogEntry, Pokemon};

/// Fetches the paginated list of known Pokemon references.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// One page of up to `limit` entries. A missing result list in the
    /// upstream response is `SyncError::UpstreamUnavailable`; an empty
    /// list is a valid zero-entry catalog.
    async fn fetch_catalog(&self, limit: u32) -> Result<Vec<CatalogEntry>, SyncError>;
}

/// Resolves one catalog entry to its full detail record.
#[async_trait]
pub trait DetailResolver: Send + Sync {
    /// Fetches and decodes the detail document behind `entry.url`. Every
    /// failure mode is reported as a per-item error and must be handled
    /// by the caller without aborting the surrounding cycle.
    async fn resolve_detail(&self, entry: &CatalogEntry) -> Result<Pokemon, ItemError>;
}
