//! WaterWatch - Rust/Axum water quality dashboard
//!
//! Server-rendered pages for browsing contaminant samples, plus a JSON API
//! for the risk engine, the sample dataset and AI filtration advice.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod calculator;
mod config;
mod error;
pub mod recommend;
pub mod risk;
mod routes;
pub mod samples;
mod solutions;
#[cfg(test)]
mod test_support;

use config::Config;
use recommend::RecommendationService;
use samples::{SampleLedger, SampleSet};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub samples: SampleLedger,
    pub recommender: RecommendationService,
}

/// Build the router for `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Pages
        .route("/", get(routes::pages::dashboard))
        .route("/map", get(routes::pages::map))
        .route("/data", get(routes::pages::data))
        .route(
            "/calculator",
            get(routes::pages::calculator_form).post(routes::pages::calculator_submit),
        )
        .route("/solutions", get(routes::pages::solutions_page))
        // JSON API
        .nest("/api/risk", risk::router())
        .nest("/api/samples", samples::router())
        .nest("/api/recommendation", recommend::router())
        .nest("/api/solutions", solutions::router())
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // State and middleware
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waterwatch_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let recommender = RecommendationService::from_config(&config)?;
    tracing::info!(backend = recommender.backend(), "Recommendation service ready");

    let samples = SampleLedger::new(SampleSet::seeded());
    tracing::info!(
        count = samples.snapshot().await.len(),
        region = %config.region_name,
        "Loaded reference samples"
    );

    let addr = config.bind_addr.clone();
    let state = AppState {
        config: Arc::new(config),
        samples,
        recommender,
    };

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.samples.snapshot().await;
    Json(serde_json::json!({
        "status": "healthy",
        "samples": snapshot.len(),
        "recommendations": state.recommender.backend(),
        "service": "waterwatch-web"
    }))
}
