//! Application error type and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::recommend::RecommendationError;
use crate::risk::validator::ValidationErrors;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "validation_failed",
                    "message": self.to_string(),
                    "details": errors.fields(),
                }),
            ),
            AppError::Recommendation(err) => (
                err.status(),
                serde_json::json!({
                    "error": "recommendation_failed",
                    "message": format!("Failed to get recommendation: {}", err),
                }),
            ),
            AppError::Template(err) => {
                tracing::error!("Template rendering failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "error": "internal_error",
                        "message": "page could not be rendered",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
