//! Outbound response objects. The internal id and the raw payload never
//! leave the service.

use serde::{Deserialize, Serialize};

use crate::domain::Pokemon;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDto {
    pub poke_api_id: i64,
    pub name: String,
    pub weight: Option<i64>,
    pub height: Option<i64>,
    pub base_experience: Option<i64>,
}

impl From<&Pokemon> for PokemonDto {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            poke_api_id: pokemon.poke_api_id,
            name: pokemon.name.clone(),
            weight: pokemon.weight,
            height: pokemon.height,
            base_experience: pokemon.base_experience,
        }
    }
}
