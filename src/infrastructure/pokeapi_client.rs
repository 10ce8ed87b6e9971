//! PokeAPI client
//!
//! Implements the catalog listing and detail resolution seams against the
//! real upstream. The detail body is kept verbatim so the stored record
//! survives upstream schema additions.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::domain::{CatalogClient, CatalogEntry, DetailResolver, ItemError, Pokemon, SyncError};
use crate::infrastructure::http_client::HttpClient;

/// Wire format of the list endpoint. `results` stays optional so a
/// response that dropped the list entirely is distinguishable from an
/// empty page.
#[derive(Debug, Deserialize)]
struct PokemonListResponse {
    results: Option<Vec<CatalogEntryDto>>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntryDto {
    name: String,
    url: String,
}

/// Wire format of a detail document. Only the modeled attributes are
/// declared; everything else rides along in the raw body.
#[derive(Debug, Deserialize)]
struct PokemonDetailResponse {
    id: Option<i64>,
    name: Option<String>,
    height: Option<i64>,
    weight: Option<i64>,
    base_experience: Option<i64>,
}

pub struct PokeApiClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(http: Arc<HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Detail locations from the catalog are normally absolute; a
    /// relative one is resolved against the configured base.
    fn detail_url(&self, entry: &CatalogEntry) -> Result<String, ItemError> {
        match Url::parse(&entry.url) {
            Ok(url) => Ok(url.into()),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(&self.base_url)
                    .map_err(|e| ItemError::fetch(&entry.url, format!("invalid base URL: {e}")))?;
                base.join(&entry.url)
                    .map(Into::into)
                    .map_err(|e| ItemError::fetch(&entry.url, e.to_string()))
            }
            Err(e) => Err(ItemError::fetch(&entry.url, e.to_string())),
        }
    }
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    async fn fetch_catalog(&self, limit: u32) -> Result<Vec<CatalogEntry>, SyncError> {
        let url = format!("{}/pokemon?limit={}", self.base_url, limit);

        let body = self
            .http
            .get_text(&url)
            .await
            .map_err(|e| SyncError::upstream_unavailable(format!("{e:#}")))?;

        let decoded: PokemonListResponse = serde_json::from_str(&body)
            .map_err(|e| SyncError::upstream_unavailable(format!("unparsable list response: {e}")))?;

        let results = decoded
            .results
            .ok_or_else(|| SyncError::upstream_unavailable("list response carried no result list"))?;

        debug!("catalog listed {} entries", results.len());

        Ok(results
            .into_iter()
            .map(|dto| CatalogEntry::new(dto.name, dto.url))
            .collect())
    }
}

#[async_trait]
impl DetailResolver for PokeApiClient {
    async fn resolve_detail(&self, entry: &CatalogEntry) -> Result<Pokemon, ItemError> {
        let url = self.detail_url(entry)?;

        let body = self
            .http
            .get_text(&url)
            .await
            .map_err(|e| ItemError::fetch(&url, format!("{e:#}")))?;

        let detail: PokemonDetailResponse =
            serde_json::from_str(&body).map_err(|e| ItemError::decode(&url, e.to_string()))?;

        let poke_api_id = detail
            .id
            .ok_or_else(|| ItemError::missing_field(&url, "id"))?;
        let name = detail
            .name
            .ok_or_else(|| ItemError::missing_field(&url, "name"))?;

        Ok(Pokemon::new(
            poke_api_id,
            name,
            detail.weight,
            detail.height,
            detail.base_experience,
            body,
        ))
    }
}
