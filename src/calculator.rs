//! The calculator flow: validate, optionally contribute the sample, assess,
//! then ask for a recommendation.

use serde::{Deserialize, Serialize};

use crate::recommend::{RecommendationOutcome, RecommendationRequest};
use crate::risk::engine;
use crate::risk::models::{ExposureInput, RiskAssessmentResult};
use crate::risk::validator::{self, Collector, ValidationErrors};
use crate::samples::models::{ContaminantSample, SampleDraft};
use crate::AppState;

/// One calculator form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub exposure: ExposureInput,
    /// Contribute the readings to the public dataset
    #[serde(default)]
    pub add_to_dataset: bool,
}

impl Submission {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Collector::default();
        if self.add_to_dataset && self.location.trim().is_empty() {
            errors.reject("location", "is required");
        }
        validator::check(&self.exposure, &mut errors);
        errors.finish()
    }

    fn draft(&self) -> SampleDraft {
        SampleDraft {
            location: self.location.clone(),
            lead: self.exposure.lead,
            arsenic: self.exposure.arsenic,
            ph: self.exposure.ph,
            nitrate: self.exposure.nitrate,
            sulfate: self.exposure.sulfate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Calculation {
    pub assessment_id: uuid::Uuid,
    pub assessment: RiskAssessmentResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<ContaminantSample>,
    #[serde(flatten)]
    pub outcome: RecommendationOutcome,
}

pub async fn run(state: &AppState, submission: Submission) -> Result<Calculation, ValidationErrors> {
    submission.validate()?;

    let sample = if submission.add_to_dataset {
        Some(state.samples.contribute(submission.draft()).await)
    } else {
        None
    };

    let assessment = engine::assess(&submission.exposure);
    let assessment_id = uuid::Uuid::new_v4();
    tracing::info!(
        %assessment_id,
        hazard_index = assessment.hazard_index,
        tier = %assessment.risk_tier,
        "Risk assessed"
    );

    let request = RecommendationRequest::from_assessment(&submission.exposure, &assessment);
    let outcome: RecommendationOutcome = state.recommender.recommend(&request).await.into();

    Ok(Calculation {
        assessment_id,
        assessment,
        sample,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::{CannedCompletion, DisabledCompletion};
    use crate::test_support::state_with;

    fn submission(add_to_dataset: bool) -> Submission {
        Submission {
            location: "Nigdi".to_string(),
            exposure: ExposureInput {
                body_weight_kg: 70.0,
                daily_intake_l: 2.0,
                lead: 0.025,
                arsenic: 0.015,
                mercury: 0.0,
                cadmium: 0.0,
                nitrate: Some(25.0),
                sulfate: None,
                ph: 6.8,
            },
            add_to_dataset,
        }
    }

    #[tokio::test]
    async fn test_contributes_and_recommends() {
        let state = state_with(CannedCompletion::new("<p>Use RO.</p>"));

        let calc = run(&state, submission(true)).await.unwrap();

        assert_eq!(calc.sample.as_ref().unwrap().id, "S019");
        assert_eq!(calc.sample.as_ref().unwrap().nitrate, Some(25.0));
        assert_eq!(state.samples.snapshot().await.len(), 19);
        assert!(calc.assessment.hazard_index > 1.0);
        assert_eq!(calc.outcome.recommendation.as_deref(), Some("<p>Use RO.</p>"));
    }

    #[tokio::test]
    async fn test_failed_recommendation_keeps_assessment() {
        let state = state_with(DisabledCompletion);

        let calc = run(&state, submission(false)).await.unwrap();

        assert!(calc.sample.is_none());
        assert_eq!(state.samples.snapshot().await.len(), 18);
        assert!((calc.assessment.hazard_index - 1.6327).abs() < 1e-4);
        assert!(calc.outcome.recommendation.is_none());
        assert!(calc
            .outcome
            .recommendation_error
            .unwrap()
            .starts_with("Failed to get recommendation"));
    }

    #[tokio::test]
    async fn test_location_required_only_when_contributing() {
        let state = state_with(DisabledCompletion);
        let mut anonymous = submission(false);
        anonymous.location.clear();
        assert!(anonymous.validate().is_ok());

        anonymous.add_to_dataset = true;
        let err = run(&state, anonymous).await.unwrap_err();
        assert_eq!(err.message_for("location"), Some("is required"));
        assert_eq!(state.samples.snapshot().await.len(), 18);
    }
}
