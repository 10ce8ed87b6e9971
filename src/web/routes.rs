//! HTTP routes for ranking queries and the manual sync trigger.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::PokemonService;
use crate::domain::RankAttribute;
use crate::web::dto::PokemonDto;
use crate::web::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub pokemon_service: Arc<PokemonService>,
}

#[derive(Debug, Deserialize)]
pub struct RankQuery {
    #[serde(rename = "numPokemon")]
    pub num_pokemon: i64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pokemon/highest", get(get_highest))
        .route("/pokemon/heaviest", get(get_heaviest))
        .route("/pokemon/highestExperience", get(get_highest_experience))
        .route("/pokemon/sync", post(post_sync))
        .route("/health", get(get_health))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

async fn get_highest(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<RankQuery>,
) -> Result<Json<Vec<PokemonDto>>, ApiError> {
    ranked(&state, RankAttribute::Height, query.num_pokemon).await
}

async fn get_heaviest(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<RankQuery>,
) -> Result<Json<Vec<PokemonDto>>, ApiError> {
    ranked(&state, RankAttribute::Weight, query.num_pokemon).await
}

async fn get_highest_experience(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<RankQuery>,
) -> Result<Json<Vec<PokemonDto>>, ApiError> {
    ranked(&state, RankAttribute::BaseExperience, query.num_pokemon).await
}

async fn ranked(
    state: &AppState,
    attribute: RankAttribute,
    num_pokemon: i64,
) -> Result<Json<Vec<PokemonDto>>, ApiError> {
    let pokemons = state.pokemon_service.top_by(attribute, num_pokemon).await?;
    Ok(Json(pokemons.iter().map(PokemonDto::from).collect()))
}

/// Runs one sync cycle synchronously; 204 on a fully completed cycle.
async fn post_sync(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    let report = state.pokemon_service.run_sync().await?;
    info!(
        listed = report.listed,
        resolved = report.resolved,
        failed = report.failed,
        "manual sync completed"
    );
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    stored_pokemon: u64,
}

async fn get_health(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let stored_pokemon = state.pokemon_service.stored_count().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        stored_pokemon,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_query_uses_the_original_parameter_name() {
        let query: RankQuery =
            serde_json::from_str(r#"{"numPokemon": 10}"#).unwrap();
        assert_eq!(query.num_pokemon, 10);

        // snake_case is not accepted; the public contract is camelCase.
        assert!(serde_json::from_str::<RankQuery>(r#"{"num_pokemon": 10}"#).is_err());
    }
}
