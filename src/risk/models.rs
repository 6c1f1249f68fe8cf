//! Data types for exposure and risk assessment.

use serde::{Deserialize, Serialize};

use super::limits::Contaminant;

/// User-supplied exposure factors and measured concentrations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExposureInput {
    /// Body weight in kg (> 0)
    pub body_weight_kg: f64,
    /// Daily drinking water intake in L/day (> 0)
    pub daily_intake_l: f64,
    /// Lead concentration in mg/L
    pub lead: f64,
    /// Arsenic concentration in mg/L
    pub arsenic: f64,
    /// Mercury concentration in mg/L
    #[serde(default)]
    pub mercury: f64,
    /// Cadmium concentration in mg/L
    #[serde(default)]
    pub cadmium: f64,
    /// Nitrate concentration in mg/L, if measured
    #[serde(default)]
    pub nitrate: Option<f64>,
    /// Sulfate concentration in mg/L, if measured
    #[serde(default)]
    pub sulfate: Option<f64>,
    /// pH (0-14)
    pub ph: f64,
}

impl ExposureInput {
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
}

/// The readings the overall risk tier is screened on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreeningReadings {
    pub lead: f64,
    pub arsenic: f64,
    pub ph: f64,
}

impl From<&ExposureInput> for ScreeningReadings {
    fn from(input: &ExposureInput) -> Self {
        Self {
            lead: input.lead,
            arsenic: input.arsenic,
            ph: input.ph,
        }
    }
}

/// Three-tier ordinal risk classification of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Interpretation of a Hazard Index against the fixed 1.0 threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardLevel {
    Low,
    High,
}

impl HazardLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Potential Risk",
            Self::High => "High Potential Risk",
        }
    }
}

/// Severity bucket for parameters screened against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSeverity {
    Acceptable,
    Elevated,
    High,
}

/// Qualitative note for a parameter without a reference dose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskNote {
    pub parameter: Contaminant,
    pub value: f64,
    pub threshold: f64,
    pub severity: NoteSeverity,
    pub message: String,
}

/// Dose and hazard quotient for one contaminant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContaminantHazard {
    pub contaminant: Contaminant,
    /// Concentration in mg/L
    pub concentration: f64,
    /// Average daily dose in mg/kg/day
    pub dose: f64,
    /// Reference dose in mg/kg/day
    pub reference_dose: f64,
    /// Hazard quotient (dimensionless)
    pub hazard_quotient: f64,
}

/// Result of a risk assessment. Recomputed on every submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessmentResult {
    pub hazards: Vec<ContaminantHazard>,
    pub hazard_index: f64,
    pub hazard_level: HazardLevel,
    pub hazard_label: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<RiskNote>,
    pub risk_tier: RiskTier,
}

impl RiskAssessmentResult {
    pub fn hazard_quotient(&self, contaminant: Contaminant) -> Option<f64> {
        self.hazards
            .iter()
            .find(|h| h.contaminant == contaminant)
            .map(|h| h.hazard_quotient)
    }
}

/// Reference dose table entry exposed over the API.
#[derive(Debug, Serialize)]
pub struct ReferenceDose {
    pub contaminant: Contaminant,
    /// mg/kg/day
    pub rfd: f64,
}
