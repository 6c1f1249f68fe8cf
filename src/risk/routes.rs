//! HTTP route handlers for the risk assessment API.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::calculator::{self, Calculation, Submission};
use crate::error::Result;
use crate::AppState;

use super::engine;
use super::limits::{Contaminant, RegulatoryLimits, WHO_LIMITS};
use super::models::{ExposureInput, ReferenceDose, RiskAssessmentResult};
use super::validator;

/// Create the risk router with all endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/assess", post(assess))
        .route("/calculate", post(calculate))
        .route("/reference-doses", get(reference_doses))
        .route("/limits", get(limits))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "risk-engine",
        "hazard_index_threshold": engine::HAZARD_INDEX_THRESHOLD,
    }))
}

/// Assess exposure without touching the dataset or the AI service.
async fn assess(Json(input): Json<ExposureInput>) -> Result<Json<RiskAssessmentResult>> {
    validator::validate(&input)?;
    Ok(Json(engine::assess(&input)))
}

/// Full calculator flow.
async fn calculate(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> Result<(StatusCode, Json<Calculation>)> {
    let calculation = calculator::run(&state, submission).await?;
    let status = if calculation.sample.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(calculation)))
}

async fn reference_doses() -> Json<Vec<ReferenceDose>> {
    Json(
        Contaminant::METALS
            .iter()
            .filter_map(|&contaminant| {
                contaminant
                    .reference_dose()
                    .map(|rfd| ReferenceDose { contaminant, rfd })
            })
            .collect(),
    )
}

async fn limits() -> Json<RegulatoryLimits> {
    Json(WHO_LIMITS)
}
