//! Hazard Quotient / Hazard Index arithmetic and rule-based screening.
//!
//! Every function here is pure and total on the validated input domain.
//! Inputs are checked by [`super::validator`] before they reach this module.

use super::limits::{Contaminant, RegulatoryLimits, WHO_LIMITS};
use super::models::{
    ContaminantHazard, ExposureInput, HazardLevel, NoteSeverity, RiskAssessmentResult, RiskNote,
    RiskTier, ScreeningReadings,
};

/// Hazard Index above which non-cancer effects are considered possible.
pub const HAZARD_INDEX_THRESHOLD: f64 = 1.0;

/// Fraction of a hard limit that puts a reading in the moderate band.
const MODERATE_FRACTION: f64 = 0.75;

/// Distance from the edges of the acceptable pH range that counts as moderate.
const PH_MARGIN: f64 = 0.5;

/// Average daily dose in mg/kg/day.
pub fn average_daily_dose(concentration_mg_l: f64, intake_l_day: f64, body_weight_kg: f64) -> f64 {
    (concentration_mg_l * intake_l_day) / body_weight_kg
}

pub fn hazard_quotient(dose: f64, reference_dose: f64) -> f64 {
    dose / reference_dose
}

/// Sum of hazard quotients.
///
/// Values are added in ascending order so the result is bit-identical for
/// any permutation of the input.
pub fn hazard_index(quotients: &[f64]) -> f64 {
    let mut sorted = quotients.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.iter().sum()
}

pub fn hazard_level(hazard_index: f64) -> HazardLevel {
    if hazard_index > HAZARD_INDEX_THRESHOLD {
        HazardLevel::High
    } else {
        HazardLevel::Low
    }
}

fn health_effect(parameter: Contaminant) -> &'static str {
    match parameter {
        Contaminant::Nitrate => {
            "significant risk of methemoglobinemia (blue baby syndrome), especially for infants under six months"
        }
        Contaminant::Sulfate => {
            "likely laxative effects and a noticeably bitter taste"
        }
        _ => "potential adverse health effects",
    }
}

/// Screen a parameter without a reference dose against its threshold.
///
/// Buckets are `(-inf, t]` acceptable, `(t, 2t]` elevated and `(2t, inf)`
/// high, so boundary values take the lower severity.
pub fn classify_non_indexed(value: f64, threshold: f64, parameter: Contaminant) -> RiskNote {
    let name = parameter.name();
    let (severity, message) = if value > 2.0 * threshold {
        (
            NoteSeverity::High,
            format!(
                "{name} at {value} mg/L is more than twice the {threshold} mg/L limit: {}.",
                health_effect(parameter)
            ),
        )
    } else if value > threshold {
        (
            NoteSeverity::Elevated,
            format!(
                "{name} at {value} mg/L exceeds the {threshold} mg/L limit. Elevated; monitor with regular testing."
            ),
        )
    } else {
        (
            NoteSeverity::Acceptable,
            format!("{name} at {value} mg/L is within the {threshold} mg/L limit."),
        )
    };

    RiskNote {
        parameter,
        value,
        threshold,
        severity,
        message,
    }
}

/// Overall tier from lead, arsenic and pH. Any hard exceedance makes the
/// sample High; otherwise any reading in the moderate band makes it
/// Moderate.
pub fn classify_overall_risk(readings: ScreeningReadings, limits: &RegulatoryLimits) -> RiskTier {
    let mut high = 0;
    let mut moderate = 0;

    for (value, limit) in [(readings.lead, limits.lead), (readings.arsenic, limits.arsenic)] {
        if value > limit {
            high += 1;
        } else if value > limit * MODERATE_FRACTION {
            moderate += 1;
        }
    }

    if readings.ph < limits.ph_min || readings.ph > limits.ph_max {
        high += 1;
    } else if readings.ph < limits.ph_min + PH_MARGIN || readings.ph > limits.ph_max - PH_MARGIN {
        moderate += 1;
    }

    if high > 0 {
        RiskTier::High
    } else if moderate > 0 {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

/// Run the full assessment for a validated exposure input.
pub fn assess(input: &ExposureInput) -> RiskAssessmentResult {
    let hazards: Vec<ContaminantHazard> = Contaminant::METALS
        .iter()
        .filter_map(|&contaminant| {
            let reference_dose = contaminant.reference_dose()?;
            let concentration = input.concentration(contaminant)?;
            let dose = average_daily_dose(concentration, input.daily_intake_l, input.body_weight_kg);
            Some(ContaminantHazard {
                contaminant,
                concentration,
                dose,
                reference_dose,
                hazard_quotient: hazard_quotient(dose, reference_dose),
            })
        })
        .collect();

    let quotients: Vec<f64> = hazards.iter().map(|h| h.hazard_quotient).collect();
    let hazard_index = hazard_index(&quotients);
    let level = hazard_level(hazard_index);

    let notes = [Contaminant::Nitrate, Contaminant::Sulfate]
        .into_iter()
        .filter_map(|parameter| {
            input
                .concentration(parameter)
                .map(|value| classify_non_indexed(value, WHO_LIMITS.limit(parameter), parameter))
        })
        .collect();

    RiskAssessmentResult {
        hazards,
        hazard_index,
        hazard_level: level,
        hazard_label: level.label(),
        notes,
        risk_tier: classify_overall_risk(input.into(), &WHO_LIMITS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(lead: f64, arsenic: f64) -> ExposureInput {
        ExposureInput {
            body_weight_kg: 70.0,
            daily_intake_l: 2.0,
            lead,
            arsenic,
            mercury: 0.0,
            cadmium: 0.0,
            nitrate: None,
            sulfate: None,
            ph: 7.2,
        }
    }

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_lead_example_dose_and_quotient() {
        let dose = average_daily_dose(0.01, 2.0, 70.0);
        assert!(close(dose, 0.000_285_714_285_7, 1e-12));

        let hq = hazard_quotient(dose, Contaminant::Lead.reference_dose().unwrap());
        assert!(close(hq, 0.0816, 1e-4));
    }

    #[test]
    fn test_lead_and_arsenic_exceed_hazard_index() {
        let result = assess(&input(0.025, 0.015));

        let hq_lead = result.hazard_quotient(Contaminant::Lead).unwrap();
        let hq_arsenic = result.hazard_quotient(Contaminant::Arsenic).unwrap();
        assert!(close(hq_lead, 0.2041, 1e-4));
        assert!(close(hq_arsenic, 1.4286, 1e-4));
        assert!(close(result.hazard_index, 1.6327, 1e-4));
        assert_eq!(result.hazard_level, HazardLevel::High);
        assert_eq!(result.hazard_label, "High Potential Risk");
    }

    #[test]
    fn test_dose_monotonicity() {
        let concentrations = [0.0, 0.001, 0.01, 0.5, 3.0];
        let intakes = [0.1, 1.0, 2.0, 4.5];
        let weights = [1.0, 10.0, 70.0, 120.0];

        for w in weights {
            for i in intakes {
                for pair in concentrations.windows(2) {
                    assert!(average_daily_dose(pair[0], i, w) <= average_daily_dose(pair[1], i, w));
                }
            }
            for c in concentrations {
                for pair in intakes.windows(2) {
                    assert!(average_daily_dose(c, pair[0], w) <= average_daily_dose(c, pair[1], w));
                }
            }
        }
        for c in concentrations {
            for i in intakes {
                for pair in weights.windows(2) {
                    assert!(average_daily_dose(c, i, pair[0]) >= average_daily_dose(c, i, pair[1]));
                }
            }
        }
    }

    #[test]
    fn test_hazard_index_is_permutation_invariant() {
        let quotients = [0.1, 1e-9, 3.3, 0.7, 1e6, 0.2];
        let expected = hazard_index(&quotients);

        let mut reversed = quotients;
        reversed.reverse();
        assert_eq!(hazard_index(&reversed).to_bits(), expected.to_bits());

        let rotated = [0.7, 1e6, 0.2, 0.1, 1e-9, 3.3];
        assert_eq!(hazard_index(&rotated).to_bits(), expected.to_bits());

        let naive: f64 = quotients.iter().sum();
        assert!(close(expected, naive, naive.abs() * 1e-9));
    }

    #[test]
    fn test_zero_dose_is_low_risk() {
        assert_eq!(hazard_quotient(0.0, 0.0003), 0.0);
        assert_eq!(hazard_index(&[]), 0.0);
        assert_eq!(hazard_level(0.0), HazardLevel::Low);
        assert_eq!(hazard_level(HAZARD_INDEX_THRESHOLD), HazardLevel::Low);
    }

    #[test]
    fn test_assess_is_idempotent() {
        let mut sample = input(0.012, 0.008);
        sample.mercury = 0.001;
        sample.cadmium = 0.002;
        sample.nitrate = Some(12.0);

        let first = assess(&sample);
        let second = assess(&sample);
        assert_eq!(first, second);
        assert_eq!(first.hazard_index.to_bits(), second.hazard_index.to_bits());
    }

    #[test]
    fn test_nitrate_between_limit_and_double_is_elevated() {
        let note = classify_non_indexed(15.0, 10.0, Contaminant::Nitrate);
        assert_eq!(note.severity, NoteSeverity::Elevated);
        assert!(!note.message.contains("methemoglobinemia"));
    }

    #[test]
    fn test_nitrate_over_double_names_health_effect() {
        let note = classify_non_indexed(25.0, 10.0, Contaminant::Nitrate);
        assert_eq!(note.severity, NoteSeverity::High);
        assert!(note.message.contains("methemoglobinemia"));

        let sulfate = classify_non_indexed(600.0, 250.0, Contaminant::Sulfate);
        assert_eq!(sulfate.severity, NoteSeverity::High);
        assert!(sulfate.message.contains("laxative"));
    }

    #[test]
    fn test_non_indexed_boundaries_take_lower_bucket() {
        assert_eq!(
            classify_non_indexed(10.0, 10.0, Contaminant::Nitrate).severity,
            NoteSeverity::Acceptable
        );
        assert_eq!(
            classify_non_indexed(20.0, 10.0, Contaminant::Nitrate).severity,
            NoteSeverity::Elevated
        );
        assert_eq!(
            classify_non_indexed(0.0, 250.0, Contaminant::Sulfate).severity,
            NoteSeverity::Acceptable
        );
    }

    #[test]
    fn test_hard_exceedance_dominates() {
        // Lead over the limit, arsenic in the moderate band.
        let readings = ScreeningReadings {
            lead: 0.025,
            arsenic: 0.009,
            ph: 7.2,
        };
        assert_eq!(classify_overall_risk(readings, &WHO_LIMITS), RiskTier::High);
    }

    #[test]
    fn test_overall_risk_tiers() {
        let low = ScreeningReadings {
            lead: 0.003,
            arsenic: 0.005,
            ph: 7.8,
        };
        assert_eq!(classify_overall_risk(low, &WHO_LIMITS), RiskTier::Low);

        let moderate_metal = ScreeningReadings { arsenic: 0.008, ..low };
        assert_eq!(classify_overall_risk(moderate_metal, &WHO_LIMITS), RiskTier::Moderate);

        let moderate_ph = ScreeningReadings { ph: 6.8, ..low };
        assert_eq!(classify_overall_risk(moderate_ph, &WHO_LIMITS), RiskTier::Moderate);

        let acidic = ScreeningReadings { ph: 6.4, ..low };
        assert_eq!(classify_overall_risk(acidic, &WHO_LIMITS), RiskTier::High);
    }

    #[test]
    fn test_overall_risk_boundaries_take_lower_tier() {
        let at_limit = ScreeningReadings {
            lead: 0.01,
            arsenic: 0.0,
            ph: 7.5,
        };
        assert_eq!(classify_overall_risk(at_limit, &WHO_LIMITS), RiskTier::Moderate);

        let below_moderate_band = ScreeningReadings {
            lead: 0.007,
            arsenic: 0.0,
            ph: 7.5,
        };
        assert_eq!(classify_overall_risk(below_moderate_band, &WHO_LIMITS), RiskTier::Low);

        let ph_at_range_edge = ScreeningReadings {
            lead: 0.0,
            arsenic: 0.0,
            ph: 8.5,
        };
        assert_eq!(classify_overall_risk(ph_at_range_edge, &WHO_LIMITS), RiskTier::Moderate);
    }

    #[test]
    fn test_moderate_band_edges_take_lower_tier() {
        let clean = ScreeningReadings {
            lead: 0.0,
            arsenic: 0.0,
            ph: 7.5,
        };

        let lead_at_band = ScreeningReadings { lead: 0.0075, ..clean };
        assert_eq!(classify_overall_risk(lead_at_band, &WHO_LIMITS), RiskTier::Low);

        let arsenic_at_band = ScreeningReadings { arsenic: 0.0075, ..clean };
        assert_eq!(classify_overall_risk(arsenic_at_band, &WHO_LIMITS), RiskTier::Low);

        for ph in [7.0, 8.0] {
            let at_margin = ScreeningReadings { ph, ..clean };
            assert_eq!(classify_overall_risk(at_margin, &WHO_LIMITS), RiskTier::Low, "pH {}", ph);
        }

        let ph_at_minimum = ScreeningReadings { ph: 6.5, ..clean };
        assert_eq!(classify_overall_risk(ph_at_minimum, &WHO_LIMITS), RiskTier::Moderate);
    }

    #[test]
    fn test_assess_includes_notes_only_for_measured_parameters() {
        let mut sample = input(0.001, 0.001);
        assert!(assess(&sample).notes.is_empty());

        sample.sulfate = Some(300.0);
        let result = assess(&sample);
        assert_eq!(result.notes.len(), 1);
        assert_eq!(result.notes[0].parameter, Contaminant::Sulfate);
        assert_eq!(result.notes[0].severity, NoteSeverity::Elevated);
    }
}
