//! Boundary validation for exposure inputs.
//!
//! The engine is only defined on the domain checked here, so every caller
//! validates before calling [`super::engine::assess`].

use serde::Serialize;

use super::models::ExposureInput;

/// Practical bounds that keep every dose and quotient finite.
pub const BODY_WEIGHT_RANGE_KG: (f64, f64) = (0.1, 1_000.0);
pub const MAX_DAILY_INTAKE_L: f64 = 100.0;
pub const MAX_CONCENTRATION_MG_L: f64 = 100_000.0;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All fields rejected for one submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid input: {}", summary(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

#[derive(Default)]
pub(crate) struct Collector(Vec<FieldError>);

impl Collector {
    pub(crate) fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn non_negative(&mut self, field: &'static str, value: f64, max: f64) {
        if !value.is_finite() {
            self.reject(field, "must be a number");
        } else if value < 0.0 {
            self.reject(field, "must be non-negative");
        } else if value > max {
            self.reject(field, format!("must be at most {}", max));
        }
    }

    fn positive(&mut self, field: &'static str, value: f64, min: f64, max: f64) {
        if !value.is_finite() {
            self.reject(field, "must be a number");
        } else if value <= 0.0 {
            self.reject(field, "must be greater than 0");
        } else if value < min {
            self.reject(field, format!("must be at least {}", min));
        } else if value > max {
            self.reject(field, format!("must be at most {}", max));
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

/// Collect field errors for `input` into `errors`.
pub(crate) fn check(input: &ExposureInput, errors: &mut Collector) {
    let (min_weight, max_weight) = BODY_WEIGHT_RANGE_KG;
    errors.positive("body_weight_kg", input.body_weight_kg, min_weight, max_weight);
    errors.positive("daily_intake_l", input.daily_intake_l, 0.0, MAX_DAILY_INTAKE_L);

    errors.non_negative("lead", input.lead, MAX_CONCENTRATION_MG_L);
    errors.non_negative("arsenic", input.arsenic, MAX_CONCENTRATION_MG_L);
    errors.non_negative("mercury", input.mercury, MAX_CONCENTRATION_MG_L);
    errors.non_negative("cadmium", input.cadmium, MAX_CONCENTRATION_MG_L);
    if let Some(nitrate) = input.nitrate {
        errors.non_negative("nitrate", nitrate, MAX_CONCENTRATION_MG_L);
    }
    if let Some(sulfate) = input.sulfate {
        errors.non_negative("sulfate", sulfate, MAX_CONCENTRATION_MG_L);
    }

    if !input.ph.is_finite() {
        errors.reject("ph", "must be a number");
    } else if !(0.0..=14.0).contains(&input.ph) {
        errors.reject("ph", "must be between 0 and 14");
    }
}

/// Validate an exposure input.
pub fn validate(input: &ExposureInput) -> Result<(), ValidationErrors> {
    let mut errors = Collector::default();
    check(input, &mut errors);
    errors.finish()
}
