//! HTTP error mapping.
//!
//! Internal failures map to opaque response bodies; the detail goes to
//! the log, never to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{QueryError, SyncError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid parameter")]
    InvalidParameter,

    #[error("Synchronization already in progress")]
    SyncInProgress,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter => StatusCode::BAD_REQUEST,
            ApiError::SyncInProgress => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidLimit(_) => Self::InvalidParameter,
            QueryError::Store(e) => {
                tracing::error!(error = ?e, "ranking query failed");
                Self::Internal
            }
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::CycleInProgress => Self::SyncInProgress,
            other => {
                tracing::error!(error = %other, "sync cycle failed");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::InvalidParameter.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::SyncInProgress.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_are_opaque() {
        let err: ApiError = QueryError::Store(anyhow::anyhow!("table pokemons is locked")).into();
        assert_eq!(err, ApiError::Internal);
        // The response message must not leak the underlying cause.
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn domain_errors_map_to_the_right_variants() {
        assert_eq!(
            ApiError::from(QueryError::InvalidLimit(0)),
            ApiError::InvalidParameter
        );
        assert_eq!(
            ApiError::from(SyncError::CycleInProgress),
            ApiError::SyncInProgress
        );
        assert_eq!(
            ApiError::from(SyncError::upstream_unavailable("down")),
            ApiError::Internal
        );
    }
}
