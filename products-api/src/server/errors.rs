//! Translation of catalog errors into HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use products_repository::CatalogError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned for every server-side failure. Details go to the log.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Errors returned by request handlers, rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was well-formed HTTP but its content is invalid.
    #[error("{0}")]
    Validation(String),

    #[error("Product not found")]
    NotFound,

    /// Any other failure. The message is logged, never returned.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ValidationError(msg) => Self::Validation(msg),
            CatalogError::NotFound(_) => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Internal(msg) => {
                error!(error = %msg, "Request failed");
                INTERNAL_ERROR_DETAIL.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
