//! Server-rendered dashboard views.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Form,
};
use serde::Deserialize;

use crate::calculator::{self, Calculation, Submission};
use crate::error::Result;
use crate::risk::limits::WHO_LIMITS;
use crate::risk::models::{ExposureInput, HazardLevel, NoteSeverity, RiskTier, ScreeningReadings};
use crate::risk::validator::{Collector, FieldError, ValidationErrors};
use crate::samples::stats::{
    average_concentrations, dashboard_stats, map_embed_url, map_markers, screen, sort_samples,
    MarkerColor, SampleRow, SortDirection, SortKey,
};
use crate::samples::SortQuery;
use crate::solutions::{self, FiltrationTechnology, ProblemRemedy, REMEDIES, TECHNOLOGIES};
use crate::AppState;

const DATE_FORMAT: &str = "%d %b %Y";

fn tier_class(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "badge-high",
        RiskTier::Moderate => "badge-moderate",
        RiskTier::Low => "badge-low",
    }
}

struct BarView {
    name: &'static str,
    average: String,
    limit: String,
    average_pct: u32,
    limit_pct: u32,
    over: bool,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    active: &'static str,
    region: String,
    total_samples: usize,
    high_risk_locations: usize,
    latest_location: String,
    latest_id: String,
    latest_date: String,
    bars: Vec<BarView>,
}

fn percent(value: f64, scale: f64) -> u32 {
    if scale <= 0.0 {
        0
    } else {
        ((value / scale) * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>> {
    let snapshot = state.samples.snapshot().await;
    let stats = dashboard_stats(snapshot.as_slice(), &WHO_LIMITS);
    let averages = average_concentrations(snapshot.as_slice(), &WHO_LIMITS);

    let scale = averages
        .iter()
        .flat_map(|a| [a.average, a.limit])
        .fold(0.0_f64, f64::max);
    let bars = averages
        .iter()
        .map(|a| BarView {
            name: a.name,
            average: format!("{}", a.average),
            limit: format!("{}", a.limit),
            average_pct: percent(a.average, scale),
            limit_pct: percent(a.limit, scale),
            over: a.average > a.limit,
        })
        .collect();

    let (latest_location, latest_id, latest_date) = match stats.latest {
        Some(latest) => (
            latest.location,
            latest.id,
            latest.date.format(DATE_FORMAT).to_string(),
        ),
        None => ("None yet".to_string(), String::new(), String::new()),
    };

    let template = DashboardTemplate {
        active: "dashboard",
        region: state.config.region_name.clone(),
        total_samples: stats.total_samples,
        high_risk_locations: stats.high_risk_locations,
        latest_location,
        latest_id,
        latest_date,
        bars,
    };
    Ok(Html(template.render()?))
}

struct MarkerView {
    id: String,
    label: String,
    location: String,
    color: &'static str,
    coordinates: String,
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate {
    active: &'static str,
    region: String,
    embed_url: String,
    markers: Vec<MarkerView>,
}

pub async fn map(State(state): State<AppState>) -> Result<Html<String>> {
    let snapshot = state.samples.snapshot().await;
    let (lat, lng) = state.config.map_center;

    let markers = map_markers(snapshot.as_slice(), &WHO_LIMITS)
        .into_iter()
        .map(|m| MarkerView {
            coordinates: format!("{:.4}, {:.4}", m.lat, m.lng),
            color: match m.color {
                MarkerColor::Red => "red",
                MarkerColor::Green => "green",
            },
            id: m.id,
            label: m.label,
            location: m.location,
        })
        .collect();

    let template = MapTemplate {
        active: "map",
        region: state.config.region_name.clone(),
        embed_url: map_embed_url(lat, lng),
        markers,
    };
    Ok(Html(template.render()?))
}

struct ColumnView {
    label: &'static str,
    href: String,
    numeric: bool,
    indicator: &'static str,
}

struct RowView {
    id: String,
    location: String,
    date: String,
    lead: String,
    arsenic: String,
    mercury: String,
    cadmium: String,
    ph: String,
    lead_over: bool,
    arsenic_over: bool,
    mercury_over: bool,
    cadmium_over: bool,
    ph_over: bool,
    tier: &'static str,
    tier_class: &'static str,
}

impl From<SampleRow> for RowView {
    fn from(row: SampleRow) -> Self {
        let s = row.sample;
        Self {
            date: s.date.format(DATE_FORMAT).to_string(),
            lead: format!("{:.3}", s.lead),
            arsenic: format!("{:.3}", s.arsenic),
            mercury: format!("{:.3}", s.mercury),
            cadmium: format!("{:.3}", s.cadmium),
            ph: format!("{:.1}", s.ph),
            lead_over: row.exceedances.lead,
            arsenic_over: row.exceedances.arsenic,
            mercury_over: row.exceedances.mercury,
            cadmium_over: row.exceedances.cadmium,
            ph_over: row.exceedances.ph,
            tier: row.risk_tier.label(),
            tier_class: tier_class(row.risk_tier),
            id: s.id,
            location: s.location,
        }
    }
}

#[derive(Template)]
#[template(path = "data.html")]
struct DataTemplate {
    active: &'static str,
    region: String,
    columns: Vec<ColumnView>,
    rows: Vec<RowView>,
}

pub async fn data(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Result<Html<String>> {
    let key = query.sort.unwrap_or_default();
    let direction = query.dir.unwrap_or_default();
    let snapshot = state.samples.snapshot().await;

    let columns = SortKey::ALL
        .iter()
        .map(|&col| {
            // Clicking the active ascending column flips it, anything else sorts ascending.
            let next = if col == key && direction == SortDirection::Ascending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            ColumnView {
                label: col.label(),
                href: format!("/data?sort={}&dir={}", col.as_str(), next.as_str()),
                numeric: col.is_numeric(),
                indicator: match (col == key, direction) {
                    (false, _) => "",
                    (true, SortDirection::Ascending) => "▲",
                    (true, SortDirection::Descending) => "▼",
                },
            }
        })
        .collect();

    let rows = sort_samples(snapshot.as_slice(), key, direction)
        .into_iter()
        .map(|s| RowView::from(screen(s, &WHO_LIMITS)))
        .collect();

    let template = DataTemplate {
        active: "data",
        region: state.config.region_name.clone(),
        columns,
        rows,
    };
    Ok(Html(template.render()?))
}

/// Raw form fields. Kept as text so a bad number can be echoed back.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorForm {
    #[serde(default)]
    location: String,
    #[serde(default)]
    lead: String,
    #[serde(default)]
    arsenic: String,
    #[serde(default)]
    mercury: String,
    #[serde(default)]
    cadmium: String,
    #[serde(default)]
    nitrate: String,
    #[serde(default)]
    sulfate: String,
    #[serde(default)]
    ph: String,
    #[serde(default)]
    weight: String,
    #[serde(default)]
    intake: String,
    /// Checkbox, present only when ticked
    add_to_dataset: Option<String>,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self {
            location: String::new(),
            lead: "0.01".to_string(),
            arsenic: "0.005".to_string(),
            mercury: String::new(),
            cadmium: String::new(),
            nitrate: String::new(),
            sulfate: String::new(),
            ph: "7.0".to_string(),
            weight: "70".to_string(),
            intake: "2".to_string(),
            add_to_dataset: Some("on".to_string()),
        }
    }
}

fn required(errors: &mut Collector, field: &'static str, raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            errors.reject(field, "must be a number");
            0.0
        }
    }
}

fn optional(errors: &mut Collector, field: &'static str, raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(required(errors, field, raw))
    }
}

impl CalculatorForm {
    fn adding(&self) -> bool {
        self.add_to_dataset.is_some()
    }

    fn submission(&self) -> std::result::Result<Submission, ValidationErrors> {
        let mut errors = Collector::default();
        let exposure = ExposureInput {
            body_weight_kg: required(&mut errors, "body_weight_kg", &self.weight),
            daily_intake_l: required(&mut errors, "daily_intake_l", &self.intake),
            lead: required(&mut errors, "lead", &self.lead),
            arsenic: required(&mut errors, "arsenic", &self.arsenic),
            mercury: optional(&mut errors, "mercury", &self.mercury).unwrap_or(0.0),
            cadmium: optional(&mut errors, "cadmium", &self.cadmium).unwrap_or(0.0),
            nitrate: optional(&mut errors, "nitrate", &self.nitrate),
            sulfate: optional(&mut errors, "sulfate", &self.sulfate),
            ph: required(&mut errors, "ph", &self.ph),
        };
        errors.finish()?;

        Ok(Submission {
            location: self.location.clone(),
            exposure,
            add_to_dataset: self.adding(),
        })
    }
}

struct QuotientView {
    name: &'static str,
    value: String,
}

struct NoteView {
    message: String,
    class: &'static str,
}

struct ResultView {
    hazard_index: String,
    label: &'static str,
    high: bool,
    quotients: Vec<QuotientView>,
    notes: Vec<NoteView>,
    tier: &'static str,
    tier_class: &'static str,
}

impl From<&Calculation> for ResultView {
    fn from(calc: &Calculation) -> Self {
        let a = &calc.assessment;
        Self {
            hazard_index: format!("{:.2}", a.hazard_index),
            label: a.hazard_label,
            high: a.hazard_level == HazardLevel::High,
            quotients: a
                .hazards
                .iter()
                .map(|h| QuotientView {
                    name: h.contaminant.name(),
                    value: format!("{:.2}", h.hazard_quotient),
                })
                .collect(),
            notes: a
                .notes
                .iter()
                .map(|n| NoteView {
                    message: n.message.clone(),
                    class: match n.severity {
                        NoteSeverity::High => "note-high",
                        NoteSeverity::Elevated => "note-elevated",
                        NoteSeverity::Acceptable => "note-ok",
                    },
                })
                .collect(),
            tier: a.risk_tier.label(),
            tier_class: tier_class(a.risk_tier),
        }
    }
}

#[derive(Template)]
#[template(path = "calculator.html")]
struct CalculatorTemplate {
    active: &'static str,
    region: String,
    form: CalculatorForm,
    errors: Vec<FieldError>,
    notice: Option<String>,
    result: Option<ResultView>,
    recommendation: Option<String>,
    recommendation_error: Option<String>,
    advice: Vec<&'static ProblemRemedy>,
}

impl CalculatorTemplate {
    fn new(region: String, form: CalculatorForm) -> Self {
        Self {
            active: "calculator",
            region,
            form,
            errors: Vec::new(),
            notice: None,
            result: None,
            recommendation: None,
            recommendation_error: None,
            advice: Vec::new(),
        }
    }

    fn error_for(&self, field: &str) -> &str {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
            .unwrap_or("")
    }
}

pub async fn calculator_form(State(state): State<AppState>) -> Result<Html<String>> {
    let template = CalculatorTemplate::new(state.config.region_name.clone(), CalculatorForm::default());
    Ok(Html(template.render()?))
}

pub async fn calculator_submit(
    State(state): State<AppState>,
    Form(form): Form<CalculatorForm>,
) -> Result<(StatusCode, Html<String>)> {
    let mut template = CalculatorTemplate::new(state.config.region_name.clone(), form.clone());

    let outcome = match form.submission() {
        Ok(submission) => {
            let readings = ScreeningReadings::from(&submission.exposure);
            calculator::run(&state, submission)
                .await
                .map(|calc| (calc, readings))
        }
        Err(errors) => Err(errors),
    };

    let status = match outcome {
        Ok((calc, readings)) => {
            template.result = Some(ResultView::from(&calc));
            template.advice = solutions::advice_for(readings, &WHO_LIMITS);
            template.notice = calc
                .sample
                .as_ref()
                .map(|s| format!("Sample {} added for {}.", s.id, s.location));
            template.recommendation = calc.outcome.recommendation;
            template.recommendation_error = calc.outcome.recommendation_error;
            StatusCode::OK
        }
        Err(errors) => {
            template.errors = errors.0;
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };

    Ok((status, Html(template.render()?)))
}

#[derive(Template)]
#[template(path = "solutions.html")]
struct SolutionsTemplate {
    active: &'static str,
    region: String,
    technologies: &'static [FiltrationTechnology],
    remedies: &'static [ProblemRemedy],
}

pub async fn solutions_page(State(state): State<AppState>) -> Result<Html<String>> {
    let template = SolutionsTemplate {
        active: "solutions",
        region: state.config.region_name.clone(),
        technologies: TECHNOLOGIES,
        remedies: REMEDIES,
    };
    Ok(Html(template.render()?))
}
