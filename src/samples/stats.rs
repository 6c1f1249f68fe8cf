//! Aggregates and orderings behind the dashboard, table and map views.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::risk::engine::classify_overall_risk;
use crate::risk::limits::{Contaminant, RegulatoryLimits};
use crate::risk::models::RiskTier;

use super::models::ContaminantSample;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_samples: usize,
    /// Samples with lead or arsenic over the limit
    pub high_risk_locations: usize,
    pub latest: Option<LatestSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestSample {
    pub id: String,
    pub location: String,
    pub date: NaiveDate,
}

/// Lead or arsenic over its hard limit.
pub fn exceeds_metal_limits(sample: &ContaminantSample, limits: &RegulatoryLimits) -> bool {
    sample.lead > limits.lead || sample.arsenic > limits.arsenic
}

pub fn dashboard_stats(samples: &[ContaminantSample], limits: &RegulatoryLimits) -> DashboardStats {
    // On equal dates the sample earlier in the set wins.
    let latest = samples
        .iter()
        .fold(None::<&ContaminantSample>, |best, s| match best {
            Some(b) if s.date <= b.date => Some(b),
            _ => Some(s),
        })
        .map(|s| LatestSample {
            id: s.id.clone(),
            location: s.location.clone(),
            date: s.date,
        });

    DashboardStats {
        total_samples: samples.len(),
        high_risk_locations: samples
            .iter()
            .filter(|s| exceeds_metal_limits(s, limits))
            .count(),
        latest,
    }
}

/// Mean concentration of one metal next to its limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationSummary {
    pub contaminant: Contaminant,
    pub name: &'static str,
    /// Mean in mg/L, three significant digits
    pub average: f64,
    pub limit: f64,
}

fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().ceil() as i32;
    let factor = 10f64.powi(digits - magnitude);
    (value * factor).round() / factor
}

pub fn average_concentrations(
    samples: &[ContaminantSample],
    limits: &RegulatoryLimits,
) -> Vec<ConcentrationSummary> {
    if samples.is_empty() {
        return Vec::new();
    }

    Contaminant::METALS
        .iter()
        .map(|&contaminant| {
            let total: f64 = samples
                .iter()
                .filter_map(|s| s.concentration(contaminant))
                .sum();
            ConcentrationSummary {
                contaminant,
                name: contaminant.name(),
                average: round_significant(total / samples.len() as f64, 3),
                limit: limits.limit(contaminant),
            }
        })
        .collect()
}

/// Column a sample table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    Location,
    #[default]
    Date,
    Lead,
    Arsenic,
    Mercury,
    Cadmium,
    Ph,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Id,
        SortKey::Location,
        SortKey::Date,
        SortKey::Lead,
        SortKey::Arsenic,
        SortKey::Mercury,
        SortKey::Cadmium,
        SortKey::Ph,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Location => "location",
            Self::Date => "date",
            Self::Lead => "lead",
            Self::Arsenic => "arsenic",
            Self::Mercury => "mercury",
            Self::Cadmium => "cadmium",
            Self::Ph => "ph",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "Sample ID",
            Self::Location => "Location",
            Self::Date => "Date",
            Self::Lead => "Lead (mg/L)",
            Self::Arsenic => "Arsenic (mg/L)",
            Self::Mercury => "Mercury (mg/L)",
            Self::Cadmium => "Cadmium (mg/L)",
            Self::Ph => "pH",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Id | Self::Location | Self::Date)
    }

    fn compare(self, a: &ContaminantSample, b: &ContaminantSample) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Location => a.location.cmp(&b.location),
            Self::Date => a.date.cmp(&b.date),
            Self::Lead => a.lead.total_cmp(&b.lead),
            Self::Arsenic => a.arsenic.total_cmp(&b.arsenic),
            Self::Mercury => a.mercury.total_cmp(&b.mercury),
            Self::Cadmium => a.cadmium.total_cmp(&b.cadmium),
            Self::Ph => a.ph.total_cmp(&b.ph),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum SortDirection {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[default]
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Stable sort of a copy of `samples`.
pub fn sort_samples(
    samples: &[ContaminantSample],
    key: SortKey,
    direction: SortDirection,
) -> Vec<ContaminantSample> {
    let mut sorted = samples.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| key.compare(a, b)),
        SortDirection::Descending => sorted.sort_by(|a, b| key.compare(b, a)),
    }
    sorted
}

/// Which readings of a sample are over their limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Exceedances {
    pub lead: bool,
    pub arsenic: bool,
    pub mercury: bool,
    pub cadmium: bool,
    pub ph: bool,
}

pub fn exceedances(sample: &ContaminantSample, limits: &RegulatoryLimits) -> Exceedances {
    Exceedances {
        lead: sample.lead > limits.lead,
        arsenic: sample.arsenic > limits.arsenic,
        mercury: sample.mercury > limits.mercury,
        cadmium: sample.cadmium > limits.cadmium,
        ph: !limits.ph_in_range(sample.ph),
    }
}

/// A sample with its screening results attached.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    #[serde(flatten)]
    pub sample: ContaminantSample,
    pub risk_tier: RiskTier,
    pub exceedances: Exceedances,
}

pub fn screen(sample: ContaminantSample, limits: &RegulatoryLimits) -> SampleRow {
    SampleRow {
        risk_tier: classify_overall_risk((&sample).into(), limits),
        exceedances: exceedances(&sample, limits),
        sample,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Green,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub location: String,
    pub label: String,
    pub color: MarkerColor,
    pub lat: f64,
    pub lng: f64,
}

pub fn map_markers(samples: &[ContaminantSample], limits: &RegulatoryLimits) -> Vec<MapMarker> {
    samples
        .iter()
        .map(|s| MapMarker {
            id: s.id.clone(),
            location: s.location.clone(),
            label: s.location.chars().next().map(String::from).unwrap_or_default(),
            color: if exceeds_metal_limits(s, limits) {
                MarkerColor::Red
            } else {
                MarkerColor::Green
            },
            lat: s.lat,
            lng: s.lng,
        })
        .collect()
}

/// Embeddable map centred on the given point.
pub fn map_embed_url(lat: f64, lng: f64) -> String {
    format!("https://maps.google.com/maps?q={lat},{lng}&hl=en&z=12&output=embed")
}
