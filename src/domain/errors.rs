//! Error taxonomy for the sync pipeline and read path.
//!
//! Cycle-level failures (`SyncError`) abort a sync run as a whole;
//! item-level failures (`ItemError`) are confined to one catalog entry
//! and surface only as counts in the cycle report.

use thiserror::Error;

/// Failure of a whole sync cycle.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The catalog listing could not be fetched, or the response carried
    /// no result list at all. An empty list is not this error.
    #[error("upstream catalog unavailable: {reason}")]
    UpstreamUnavailable { reason: String },

    /// The bulk upsert failed. The write is transactional, so the store
    /// is still at its pre-cycle state.
    #[error("bulk upsert failed: {0}")]
    StoreWrite(#[source] anyhow::Error),

    /// Another cycle holds the run slot.
    #[error("a sync cycle is already running")]
    CycleInProgress,
}

impl SyncError {
    pub fn upstream_unavailable(reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            reason: reason.into(),
        }
    }
}

/// Failure of a single catalog entry's detail resolution. Never aborts
/// the cycle.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("detail fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("detail payload from {url} could not be decoded: {reason}")]
    Decode { url: String, reason: String },

    #[error("detail payload from {url} is missing required field '{field}'")]
    MissingField { url: String, field: String },
}

impl ItemError {
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn decode(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(url: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            url: url.into(),
            field: field.into(),
        }
    }
}

/// Failure of a read-side ranking query.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The caller asked for fewer than one record. Rejected before the
    /// store is touched.
    #[error("numPokemon must be >= 1, got {0}")]
    InvalidLimit(i64),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
