//! HTTP surface consumed by the routing layer.

pub mod dto;
pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::AppState;
