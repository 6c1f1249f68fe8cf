//! Prompt text for the recommendation request.

use std::fmt::Write;

use super::models::RecommendationRequest;

pub fn build(region: &str, request: &RecommendationRequest) -> String {
    let mut readings = format!(
        "lead {} mg/L, arsenic {} mg/L, mercury {} mg/L, cadmium {} mg/L",
        request.lead, request.arsenic, request.mercury, request.cadmium
    );
    if let Some(nitrate) = request.nitrate {
        let _ = write!(readings, ", nitrate {nitrate} mg/L");
    }
    if let Some(sulfate) = request.sulfate {
        let _ = write!(readings, ", sulfate {sulfate} mg/L");
    }
    let _ = write!(readings, " and a pH of {}", request.ph);

    format!(
        "You are a water quality expert. A water sample from a home in {region} shows {readings}. \
         This results in a Hazard Index of {hi:.2}. Based on these specific values, provide a concise, \
         actionable recommendation for the resident. Start with a clear one-sentence summary of the \
         risk level. Then, suggest the most appropriate type of water filter (e.g., RO, Activated \
         Carbon) and explain why in one sentence. Finally, list 2-3 simple, immediate safety tips. \
         Format the output as simple HTML paragraphs.",
        hi = request.hazard_index,
    )
}
