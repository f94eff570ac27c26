//! Randomized trial plan over the parameter grid.
//!
//! Feature-on and feature-off trials are interleaved in a uniformly random
//! order so that any monotonic drift in ambient load during the run affects
//! both sides of every comparison equally.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{BucketKey, TrialParameter};

/// Ordered trial sequence together with the grid it was expanded from.
#[derive(Debug, Clone)]
pub struct TrialPlan {
    work_units: Vec<u64>,
    repetitions: Vec<u64>,
    trials_per_bucket: usize,
    trials: Vec<TrialParameter>,
}

impl TrialPlan {
    /// Work-unit axis, in report order.
    pub fn work_units(&self) -> &[u64] {
        &self.work_units
    }

    /// Repetitions axis, in report order.
    pub fn repetitions(&self) -> &[u64] {
        &self.repetitions
    }

    /// Trials emitted for every bucket.
    pub fn trials_per_bucket(&self) -> usize {
        self.trials_per_bucket
    }

    /// The randomized trial sequence.
    pub fn trials(&self) -> &[TrialParameter] {
        &self.trials
    }

    /// Number of trials in the plan.
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Whether the plan has no trials.
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Every bucket implied by the grid, in grid order.
    pub fn buckets(&self) -> impl Iterator<Item = BucketKey> + '_ {
        self.work_units.iter().flat_map(move |&w| {
            self.repetitions.iter().flat_map(move |&r| {
                [false, true]
                    .into_iter()
                    .map(move |on| BucketKey::new(on, w, r))
            })
        })
    }
}

/// Expand the grid into `trials_per_bucket` on/off pairs per (w, r) and
/// shuffle the full sequence.
///
/// The shuffle is Fisher–Yates driven by `rng`, so a seeded generator gives
/// a reproducible order.
pub fn build_plan<R: Rng + ?Sized>(
    work_units: &[u64],
    repetitions: &[u64],
    trials_per_bucket: usize,
    rng: &mut R,
) -> TrialPlan {
    let mut trials =
        Vec::with_capacity(work_units.len() * repetitions.len() * trials_per_bucket * 2);
    for &w in work_units {
        for &r in repetitions {
            for _ in 0..trials_per_bucket {
                trials.push(TrialParameter::new(w, r, true));
                trials.push(TrialParameter::new(w, r, false));
            }
        }
    }

    trials.shuffle(rng);

    TrialPlan {
        work_units: work_units.to_vec(),
        repetitions: repetitions.to_vec(),
        trials_per_bucket,
        trials,
    }
}
