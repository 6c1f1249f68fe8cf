//! Request and response types for recommendations.

use serde::{Deserialize, Serialize};

use crate::risk::models::{ExposureInput, RiskAssessmentResult};
use crate::risk::validator::{Collector, ValidationErrors};

/// Numeric fields sent to the completion service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecommendationRequest {
    /// Lead in mg/L
    pub lead: f64,
    /// Arsenic in mg/L
    pub arsenic: f64,
    #[serde(default)]
    pub mercury: f64,
    #[serde(default)]
    pub cadmium: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nitrate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sulfate: Option<f64>,
    pub ph: f64,
    pub hazard_index: f64,
}

impl RecommendationRequest {
    pub fn from_assessment(input: &ExposureInput, result: &RiskAssessmentResult) -> Self {
        Self {
            lead: input.lead,
            arsenic: input.arsenic,
            mercury: input.mercury,
            cadmium: input.cadmium,
            nitrate: input.nitrate,
            sulfate: input.sulfate,
            ph: input.ph,
            hazard_index: result.hazard_index,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Collector::default();
        for (field, value) in [
            ("lead", Some(self.lead)),
            ("arsenic", Some(self.arsenic)),
            ("mercury", Some(self.mercury)),
            ("cadmium", Some(self.cadmium)),
            ("nitrate", self.nitrate),
            ("sulfate", self.sulfate),
            ("hazard_index", Some(self.hazard_index)),
        ] {
            match value {
                Some(v) if !v.is_finite() || v < 0.0 => {
                    errors.reject(field, "must be a non-negative number")
                }
                _ => {}
            }
        }
        if !(0.0..=14.0).contains(&self.ph) {
            errors.reject("ph", "must be between 0 and 14");
        }
        errors.finish()
    }
}

/// Sanitized recommendation markup.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
    pub input_hash: String,
}
