//! Regulatory thresholds and reference doses.

use serde::Serialize;

/// Contaminants tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Contaminant {
    Lead,
    Arsenic,
    Mercury,
    Cadmium,
    Nitrate,
    Sulfate,
}

impl Contaminant {
    /// Heavy metals with an established reference dose, in display order.
    pub const METALS: [Contaminant; 4] = [
        Contaminant::Lead,
        Contaminant::Arsenic,
        Contaminant::Mercury,
        Contaminant::Cadmium,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Arsenic => "Arsenic",
            Self::Mercury => "Mercury",
            Self::Cadmium => "Cadmium",
            Self::Nitrate => "Nitrate",
            Self::Sulfate => "Sulfate",
        }
    }

    /// Oral reference dose in mg/kg-body-weight/day.
    ///
    /// Nitrate and sulfate have no RfD here and are screened against their
    /// MCL/SMCL instead.
    pub fn reference_dose(self) -> Option<f64> {
        match self {
            Self::Lead => Some(0.0035),
            Self::Arsenic => Some(0.0003),
            Self::Cadmium => Some(0.0005),
            Self::Mercury => Some(0.0003),
            Self::Nitrate | Self::Sulfate => None,
        }
    }
}

impl std::fmt::Display for Contaminant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// WHO/EPA drinking water thresholds (mg/L, pH units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegulatoryLimits {
    pub lead: f64,
    pub arsenic: f64,
    pub mercury: f64,
    pub cadmium: f64,
    /// EPA maximum contaminant level
    pub nitrate: f64,
    /// EPA secondary (aesthetic) contaminant level
    pub sulfate: f64,
    pub ph_min: f64,
    pub ph_max: f64,
}

/// The table every screening in the service compares against.
pub const WHO_LIMITS: RegulatoryLimits = RegulatoryLimits {
    lead: 0.01,
    arsenic: 0.01,
    mercury: 0.006,
    cadmium: 0.003,
    nitrate: 10.0,
    sulfate: 250.0,
    ph_min: 6.5,
    ph_max: 8.5,
};

impl RegulatoryLimits {
    pub fn limit(&self, contaminant: Contaminant) -> f64 {
        match contaminant {
            Contaminant::Lead => self.lead,
            Contaminant::Arsenic => self.arsenic,
            Contaminant::Mercury => self.mercury,
            Contaminant::Cadmium => self.cadmium,
            Contaminant::Nitrate => self.nitrate,
            Contaminant::Sulfate => self.sulfate,
        }
    }

    pub fn ph_in_range(&self, ph: f64) -> bool {
        (self.ph_min..=self.ph_max).contains(&ph)
    }
}
