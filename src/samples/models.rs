//! Water sample types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::risk::limits::Contaminant;
use crate::risk::models::ScreeningReadings;
use crate::risk::validator::{Collector, ValidationErrors};

/// One observation at one location. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContaminantSample {
    /// Sample identifier, e.g. `S001`
    pub id: String,
    pub location: String,
    pub date: NaiveDate,
    /// Lead in mg/L
    pub lead: f64,
    /// Arsenic in mg/L
    pub arsenic: f64,
    /// Mercury in mg/L
    pub mercury: f64,
    /// Cadmium in mg/L
    pub cadmium: f64,
    pub ph: f64,
    /// Nitrate in mg/L, if measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nitrate: Option<f64>,
    /// Sulfate in mg/L, if measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sulfate: Option<f64>,
    pub lat: f64,
    pub lng: f64,
}

impl ContaminantSample {
    pub fn concentration(&self, contaminant: Contaminant) -> Option<f64> {
        match contaminant {
            Contaminant::Lead => Some(self.lead),
            Contaminant::Arsenic => Some(self.arsenic),
            Contaminant::Mercury => Some(self.mercury),
            Contaminant::Cadmium => Some(self.cadmium),
            Contaminant::Nitrate => self.nitrate,
            Contaminant::Sulfate => self.sulfate,
        }
    }

    /// Numeric part of the identifier, 0 when it does not parse.
    pub fn sequence(&self) -> u32 {
        self.id
            .strip_prefix('S')
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }
}

impl From<&ContaminantSample> for ScreeningReadings {
    fn from(sample: &ContaminantSample) -> Self {
        Self {
            lead: sample.lead,
            arsenic: sample.arsenic,
            ph: sample.ph,
        }
    }
}

/// Readings contributed by a resident. The store fills in id, date,
/// coordinates and the metals the form does not ask for.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SampleDraft {
    pub location: String,
    pub lead: f64,
    pub arsenic: f64,
    pub ph: f64,
    #[serde(default)]
    pub nitrate: Option<f64>,
    #[serde(default)]
    pub sulfate: Option<f64>,
}

impl SampleDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Collector::default();
        if self.location.trim().is_empty() {
            errors.reject("location", "is required");
        }
        for (field, value) in [
            ("lead", Some(self.lead)),
            ("arsenic", Some(self.arsenic)),
            ("nitrate", self.nitrate),
            ("sulfate", self.sulfate),
        ] {
            match value {
                Some(v) if !v.is_finite() => errors.reject(field, "must be a number"),
                Some(v) if v < 0.0 => errors.reject(field, "must be non-negative"),
                _ => {}
            }
        }
        if !(0.0..=14.0).contains(&self.ph) {
            errors.reject("ph", "must be between 0 and 14");
        }
        errors.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_parsing() {
        let mut sample = crate::samples::seed::reference_samples().remove(0);
        assert_eq!(sample.sequence(), 1);

        sample.id = "legacy".to_string();
        assert_eq!(sample.sequence(), 0);
    }

    #[test]
    fn test_draft_requires_location() {
        let draft = SampleDraft {
            location: "  ".to_string(),
            lead: 0.01,
            arsenic: 0.0,
            ph: 7.0,
            nitrate: None,
            sulfate: None,
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err.message_for("location"), Some("is required"));
    }

    #[test]
    fn test_draft_rejects_out_of_range_values() {
        let draft = SampleDraft {
            location: "Pimpri".to_string(),
            lead: -0.01,
            arsenic: 0.0,
            ph: 14.5,
            nitrate: Some(f64::NAN),
            sulfate: None,
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields().len(), 3);
    }
}
