//! Filtration technologies and remedies for common water problems.

use axum::{response::Json, routing::get, Router};
use serde::Serialize;

use crate::risk::limits::RegulatoryLimits;
use crate::risk::models::ScreeningReadings;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FiltrationTechnology {
    pub title: &'static str,
    pub description: &'static str,
    pub best_for: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    HighLead,
    HighArsenic,
    UnsafePh,
}

#[derive(Debug, Serialize)]
pub struct ProblemRemedy {
    pub problem: Problem,
    pub issue: &'static str,
    pub solutions: &'static [&'static str],
}

pub const TECHNOLOGIES: &[FiltrationTechnology] = &[
    FiltrationTechnology {
        title: "Reverse Osmosis (RO) Filters",
        description: "Highly effective at removing a wide range of contaminants, including heavy metals like lead and arsenic, salts, and other dissolved solids by forcing water through a semipermeable membrane.",
        best_for: &["Lead", "Arsenic", "Mercury", "Cadmium", "High TDS (Total Dissolved Solids)"],
    },
    FiltrationTechnology {
        title: "Activated Carbon Filters",
        description: "Excellent for removing chlorine, pesticides, and volatile organic compounds (VOCs), which improves taste and odor. Some specialized carbon blocks can also remove lead.",
        best_for: &["Chlorine", "Bad Taste/Odor", "Pesticides", "Some Lead (check certification)"],
    },
    FiltrationTechnology {
        title: "UV Purifiers",
        description: "Uses ultraviolet light to kill bacteria, viruses, and other microorganisms. It does not remove chemical contaminants, so it is often paired with other filtration systems.",
        best_for: &["Bacteria", "Viruses", "Protozoa", "Microbiological safety"],
    },
];

pub const REMEDIES: &[ProblemRemedy] = &[
    ProblemRemedy {
        problem: Problem::HighLead,
        issue: "High Lead Levels (> 0.01 mg/L)",
        solutions: &[
            "Use a certified Reverse Osmosis (RO) or a specific lead-rated Activated Carbon filter.",
            "Do not boil water to remove lead. This will concentrate the lead further.",
            "Use only cold water for drinking and cooking, as hot water can leach more lead from pipes.",
            "Consider replacing old plumbing fixtures, especially those installed before 1986.",
        ],
    },
    ProblemRemedy {
        problem: Problem::HighArsenic,
        issue: "High Arsenic Levels (> 0.01 mg/L)",
        solutions: &[
            "Reverse Osmosis (RO) is the most effective method for removing arsenic from residential water.",
            "Specialized anion exchange filters or adsorptive media filters (iron oxide) can also be effective.",
            "Boiling water does not remove arsenic.",
            "Seek alternative water sources for drinking and cooking if levels are extremely high and treatment is not possible.",
        ],
    },
    ProblemRemedy {
        problem: Problem::UnsafePh,
        issue: "Unsafe pH Levels (< 6.5 or > 8.5)",
        solutions: &[
            "For low pH (acidic water), an acid neutralizing filter containing calcite or magnesium oxide can be used to raise the pH.",
            "For high pH (alkaline water), a small, controlled acid injection system can be installed to lower the pH, though this is less common in homes.",
            "Unsafe pH can cause corrosion of pipes (leaching metals) and reduce the effectiveness of disinfection.",
        ],
    },
];

/// Remedies for every problem the readings show.
pub fn advice_for(readings: ScreeningReadings, limits: &RegulatoryLimits) -> Vec<&'static ProblemRemedy> {
    let triggered = |problem: Problem| match problem {
        Problem::HighLead => readings.lead > limits.lead,
        Problem::HighArsenic => readings.arsenic > limits.arsenic,
        Problem::UnsafePh => !limits.ph_in_range(readings.ph),
    };
    REMEDIES.iter().filter(|r| triggered(r.problem)).collect()
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(catalog))
}

async fn catalog() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "technologies": TECHNOLOGIES,
        "problems": REMEDIES,
    }))
}
