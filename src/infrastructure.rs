//! Infrastructure layer for database access, upstream API calls, and
//! process-level concerns (configuration, logging).

pub mod config;
pub mod database_connection;
pub mod http_client;
pub mod logging;
pub mod pokeapi_client;
pub mod pokemon_repository;

// Re-export commonly used items
pub use config::AppConfig;
pub use database_connection::DatabaseConnection;
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::init_logging;
pub use pokeapi_client::PokeApiClient;
pub use pokemon_repository::SqlitePokemonRepository;
