use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinematch_core::{BuildError, DatasetError, QueryError};
use serde_json::json;

/// Errors surfaced by the HTTP layer.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("No recommendations found for \"{0}\"")]
    NotFound(String),

    #[error("Recommendation system not ready")]
    NotReady,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Movie database not available: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Index build failed: {0}")]
    Build(#[from] BuildError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(title) => ApiError::NotFound(title),
            QueryError::NotReady => ApiError::NotReady,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Build(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Dataset(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
