//! Exposure and risk assessment.
//!
//! Average daily dose, per-contaminant Hazard Quotients, the summed Hazard
//! Index and rule-based risk tiers.

pub mod engine;
pub mod limits;
pub mod models;
mod routes;
pub mod validator;

pub use routes::router;
