//! AI filtration recommendations.
//!
//! Builds a prompt from measured concentrations and the computed Hazard
//! Index, sends it to a hosted completion service and sanitizes the reply
//! before it reaches a page.

mod client;
pub mod models;
mod prompt;
mod routes;
pub mod sanitize;
mod service;

use axum::http::StatusCode;
use thiserror::Error;

pub use client::{CompletionService, DisabledCompletion};
pub use models::RecommendationRequest;
pub use routes::router;
pub use service::RecommendationService;

#[cfg(test)]
pub(crate) use service::tests::CannedCompletion;

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("AI recommendations are not configured")]
    NotConfigured,

    #[error("request to AI service failed: {0}")]
    Transport(String),

    #[error("AI service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("AI service timed out")]
    Timeout,

    #[error("Invalid response from AI")]
    EmptyResponse,
}

impl RecommendationError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Transport(_) | Self::Upstream { .. } | Self::EmptyResponse => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Recommendation text or the reason it is missing. The assessment is
/// shown either way.
#[derive(Debug, Default, serde::Serialize)]
pub struct RecommendationOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_error: Option<String>,
}

impl From<Result<String, RecommendationError>> for RecommendationOutcome {
    fn from(result: Result<String, RecommendationError>) -> Self {
        match result {
            Ok(html) => Self {
                recommendation: Some(html),
                recommendation_error: None,
            },
            Err(e) => Self {
                recommendation: None,
                recommendation_error: Some(format!("Failed to get recommendation: {}", e)),
            },
        }
    }
}
