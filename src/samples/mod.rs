//! Water sample dataset.
//!
//! Samples live in memory for the life of the process. The collection is
//! append-only and owned by [`crate::AppState`].

pub mod models;
mod routes;
mod seed;
pub mod stats;
pub mod store;

pub use routes::{router, SortQuery};
pub use store::{SampleLedger, SampleSet};
