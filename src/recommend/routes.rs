//! HTTP route handlers for the recommendation API.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::error::Result;
use crate::AppState;

use super::models::{RecommendationRequest, RecommendationResponse};

/// Create the recommendation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", post(recommend))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "recommendation",
        "backend": state.recommender.backend(),
    }))
}

/// Recommendation for already-assessed readings.
async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>> {
    request.validate()?;

    let recommendation = state.recommender.recommend(&request).await?;
    Ok(Json(RecommendationResponse {
        recommendation,
        input_hash: state.recommender.input_hash(&request),
    }))
}
