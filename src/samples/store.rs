//! In-memory sample collection.
//!
//! A [`SampleSet`] is never mutated. Adding a sample builds a new set and
//! the [`SampleLedger`] swaps it in, so readers holding an older snapshot
//! keep a consistent view.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::RwLock;

use super::models::{ContaminantSample, SampleDraft};
use super::seed::reference_samples;

/// Ordered, newest-first collection of samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<ContaminantSample>,
}

impl SampleSet {
    pub fn new(samples: Vec<ContaminantSample>) -> Self {
        Self { samples }
    }

    pub fn seeded() -> Self {
        Self::new(reference_samples())
    }

    pub fn as_slice(&self) -> &[ContaminantSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Next identifier: highest existing sequence plus one, zero padded.
    pub fn next_id(&self) -> String {
        let max = self.samples.iter().map(|s| s.sequence()).max().unwrap_or(0);
        format!("S{:03}", max + 1)
    }

    /// A new set with `sample` prepended.
    pub fn with_sample(&self, sample: ContaminantSample) -> SampleSet {
        let mut samples = Vec::with_capacity(self.samples.len() + 1);
        samples.push(sample);
        samples.extend(self.samples.iter().cloned());
        SampleSet { samples }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Build a sample from a contributed draft.
///
/// Mercury, cadmium and coordinates are not collected by the form and are
/// drawn from the ranges observed across the municipal area.
pub fn build_sample<R: Rng>(
    draft: SampleDraft,
    existing: &SampleSet,
    date: NaiveDate,
    rng: &mut R,
) -> ContaminantSample {
    ContaminantSample {
        id: existing.next_id(),
        location: draft.location.trim().to_string(),
        date,
        lead: draft.lead,
        arsenic: draft.arsenic,
        mercury: round_to(rng.gen_range(0.0..0.008), 3),
        cadmium: round_to(rng.gen_range(0.0..0.005), 3),
        ph: draft.ph,
        nitrate: draft.nitrate,
        sulfate: draft.sulfate,
        lat: round_to(rng.gen_range(18.57..18.69), 4),
        lng: round_to(rng.gen_range(73.73..73.89), 4),
    }
}

/// Shared handle to the current sample set.
#[derive(Clone)]
pub struct SampleLedger {
    current: Arc<RwLock<Arc<SampleSet>>>,
}

impl SampleLedger {
    pub fn new(initial: SampleSet) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// The current set. Later contributions do not affect the returned value.
    pub async fn snapshot(&self) -> Arc<SampleSet> {
        self.current.read().await.clone()
    }

    /// Add a contributed sample dated today (UTC).
    pub async fn contribute(&self, draft: SampleDraft) -> ContaminantSample {
        let mut rng = StdRng::from_entropy();
        self.contribute_with(draft, Utc::now().date_naive(), &mut rng)
            .await
    }

    pub async fn contribute_with<R: Rng + Send>(
        &self,
        draft: SampleDraft,
        date: NaiveDate,
        rng: &mut R,
    ) -> ContaminantSample {
        let mut current = self.current.write().await;
        let sample = build_sample(draft, &current, date, rng);
        *current = Arc::new(current.with_sample(sample.clone()));

        tracing::info!(
            id = %sample.id,
            location = %sample.location,
            total = current.len(),
            "Sample added"
        );
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(location: &str) -> SampleDraft {
        SampleDraft {
            location: location.to_string(),
            lead: 0.02,
            arsenic: 0.004,
            ph: 7.1,
            nitrate: None,
            sulfate: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    #[test]
    fn test_next_id_follows_highest_sequence() {
        let set = SampleSet::seeded();
        assert_eq!(set.next_id(), "S019");
        assert_eq!(SampleSet::default().next_id(), "S001");
    }

    #[test]
    fn test_with_sample_prepends_without_mutating() {
        let original = SampleSet::seeded();
        let mut rng = StdRng::seed_from_u64(7);
        let sample = build_sample(draft("Pimpri"), &original, date(), &mut rng);

        let updated = original.with_sample(sample.clone());

        assert_eq!(original.len(), 18);
        assert_eq!(updated.len(), 19);
        assert_eq!(updated.as_slice()[0], sample);
        assert_eq!(&updated.as_slice()[1..], original.as_slice());
    }

    #[test]
    fn test_generated_fields_stay_in_range() {
        let set = SampleSet::seeded();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let sample = build_sample(draft(" Wakad "), &set, date(), &mut rng);
            assert_eq!(sample.location, "Wakad");
            assert!((0.0..=0.008).contains(&sample.mercury));
            assert!((0.0..=0.005).contains(&sample.cadmium));
            assert!((18.57..=18.69).contains(&sample.lat));
            assert!((73.73..=73.89).contains(&sample.lng));
            assert_eq!(round_to(sample.lat, 4), sample.lat);
        }
    }

    #[tokio::test]
    async fn test_ledger_snapshot_is_stable() {
        let ledger = SampleLedger::new(SampleSet::seeded());
        let before = ledger.snapshot().await;

        let mut rng = StdRng::seed_from_u64(1);
        let added = ledger.contribute_with(draft("Moshi"), date(), &mut rng).await;
        let second = ledger.contribute_with(draft("Dighi"), date(), &mut rng).await;

        assert_eq!(added.id, "S019");
        assert_eq!(second.id, "S020");
        assert_eq!(before.len(), 18);

        let after = ledger.snapshot().await;
        assert_eq!(after.len(), 20);
        assert_eq!(after.as_slice()[0].id, "S020");
    }
}
