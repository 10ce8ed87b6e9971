//! Domain module - entities, errors, and the trait seams of the sync
//! pipeline.

pub mod errors;
pub mod pokemon;
pub mod repositories;
pub mod services;

// Re-export commonly used items for convenience
pub use errors::{ItemError, QueryError, SyncError};
pub use pokemon::{CatalogEntry, Pokemon, RankAttribute, SyncReport};
pub use repositories::PokemonRepository;
pub use services::{CatalogClient, DetailResolver};
