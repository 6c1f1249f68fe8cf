//! HTTP route handlers for the sample API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::risk::limits::WHO_LIMITS;
use crate::AppState;

use super::models::{ContaminantSample, SampleDraft};
use super::stats::{
    average_concentrations, dashboard_stats, map_embed_url, map_markers, screen, sort_samples,
    ConcentrationSummary, DashboardStats, MapMarker, SampleRow, SortDirection, SortKey,
};

/// Create the samples router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/stats", get(stats))
        .route("/map", get(map))
}

/// Table ordering from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    pub sort: Option<SortKey>,
    pub dir: Option<SortDirection>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Json<Vec<SampleRow>> {
    let snapshot = state.samples.snapshot().await;
    let sorted = sort_samples(
        snapshot.as_slice(),
        query.sort.unwrap_or_default(),
        query.dir.unwrap_or_default(),
    );
    Json(sorted.into_iter().map(|s| screen(s, &WHO_LIMITS)).collect())
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<SampleDraft>,
) -> Result<(StatusCode, Json<ContaminantSample>)> {
    draft.validate()?;
    let sample = state.samples.contribute(draft).await;
    Ok((StatusCode::CREATED, Json(sample)))
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    #[serde(flatten)]
    stats: DashboardStats,
    averages: Vec<ConcentrationSummary>,
}

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.samples.snapshot().await;
    Json(StatsResponse {
        stats: dashboard_stats(snapshot.as_slice(), &WHO_LIMITS),
        averages: average_concentrations(snapshot.as_slice(), &WHO_LIMITS),
    })
}

#[derive(Debug, Serialize)]
struct MapResponse {
    embed_url: String,
    center: [f64; 2],
    markers: Vec<MapMarker>,
}

async fn map(State(state): State<AppState>) -> Json<MapResponse> {
    let snapshot = state.samples.snapshot().await;
    let (lat, lng) = state.config.map_center;
    Json(MapResponse {
        embed_url: map_embed_url(lat, lng),
        center: [lat, lng],
        markers: map_markers(snapshot.as_slice(), &WHO_LIMITS),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::recommend::DisabledCompletion;
    use crate::test_support::{body_json, state_with};

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_list_sorted_by_query() {
        let app = crate::app(state_with(DisabledCompletion));

        let response = app
            .oneshot(get("/api/samples?sort=arsenic&dir=asc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 18);
        assert_eq!(rows[0]["id"], "S017");
        assert_eq!(rows[17]["id"], "S016");
        assert_eq!(rows[17]["risk_tier"], "High");
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_sort_key() {
        let app = crate::app(state_with(DisabledCompletion));
        let response = app.oneshot(get("/api/samples?sort=zinc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_then_stats() {
        let state = state_with(DisabledCompletion);

        let request = Request::builder()
            .method("POST")
            .uri("/api/samples")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({"location": "Ravet", "lead": 0.03, "arsenic": 0.002, "ph": 7.0})
                    .to_string(),
            ))
            .unwrap();
        let response = crate::app(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["id"], "S019");

        let response = crate::app(state).oneshot(get("/api/samples/stats")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["total_samples"], 19);
        assert_eq!(body["high_risk_locations"], 13);
        assert_eq!(body["averages"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_location() {
        let app = crate::app(state_with(DisabledCompletion));
        let request = Request::builder()
            .method("POST")
            .uri("/api/samples")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({"location": "", "lead": 0.01, "arsenic": 0.0, "ph": 7.0}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_map_markers() {
        let app = crate::app(state_with(DisabledCompletion));
        let response = app.oneshot(get("/api/samples/map")).await.unwrap();
        let body = body_json(response).await;

        assert!(body["embed_url"].as_str().unwrap().contains("output=embed"));
        assert_eq!(body["markers"].as_array().unwrap().len(), 18);
        assert_eq!(body["markers"][0]["color"], "red");
    }
}
