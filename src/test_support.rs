//! Shared fixtures for handler tests.

use std::sync::Arc;

use axum::{body::Body, http::Response};

use crate::config::Config;
use crate::recommend::{CompletionService, RecommendationService};
use crate::samples::{SampleLedger, SampleSet};
use crate::AppState;

/// Default config, the reference dataset and `client` as the AI backend.
pub fn state_with(client: impl CompletionService + 'static) -> AppState {
    let config = Config::default();
    let recommender = RecommendationService::new(
        Arc::new(client),
        config.region_name.clone(),
        config.ai.cache_ttl,
    );
    AppState {
        config: Arc::new(config),
        samples: SampleLedger::new(SampleSet::seeded()),
        recommender,
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
