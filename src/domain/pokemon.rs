//! Pokemon domain model
//!
//! Entities and value objects for the synchronized Pokemon snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One entry of the upstream catalog listing. Transient: produced by the
/// catalog client, consumed once by the detail resolver, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A synchronized Pokemon record.
///
/// `id` is assigned once when the record is first created and survives
/// later syncs; `poke_api_id` is the upstream natural key the upsert is
/// keyed on. The full detail payload is kept verbatim in `raw_json` so
/// upstream fields we do not model yet are not lost.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pokemon {
    pub id: String,
    pub poke_api_id: i64,
    pub name: String,
    pub weight: Option<i64>,
    pub height: Option<i64>,
    pub base_experience: Option<i64>,
    pub raw_json: String,
    pub last_synced_at: DateTime<Utc>,
}

impl Pokemon {
    /// Build a freshly synchronized record. The upstream omits
    /// `base_experience` (and occasionally the measurements) for some
    /// entries, so those stay optional.
    pub fn new(
        poke_api_id: i64,
        name: String,
        weight: Option<i64>,
        height: Option<i64>,
        base_experience: Option<i64>,
        raw_json: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            poke_api_id,
            name,
            weight,
            height,
            base_experience,
            raw_json,
            last_synced_at: Utc::now(),
        }
    }
}

/// Sortable numeric attributes of a [`Pokemon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankAttribute {
    Weight,
    Height,
    BaseExperience,
}

impl RankAttribute {
    /// Column backing this attribute in the `pokemons` table.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Height => "height",
            Self::BaseExperience => "base_experience",
        }
    }
}

/// Outcome of one sync cycle. `failed` counts catalog entries whose
/// detail resolution was dropped; the cycle itself still succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SyncReport {
    pub listed: usize,
    pub resolved: usize,
    pub failed: usize,
}
