//! Trial execution over a randomized plan.
//!
//! Each trial brackets `iterations` rounds of filler work (plus the target
//! operation when the feature is on) between two resource snapshots, and
//! records the per-iteration difference in the trial's bucket.
//!
//! No sample is ever discarded or retried: outliers stay in their bucket
//! and are absorbed by aggregation.

use std::hint::black_box;
use std::time::Duration;

use tracing::debug;

use super::usage::{SelfUsage, UsageProvider};
use super::workload::work;
use crate::calibration::Calibration;
use crate::config::IterationsPerTrial;
use crate::error::Result;
use crate::payload::TargetOperation;
use crate::plan::TrialPlan;
use crate::results::ExperimentResults;

/// Number of progress messages emitted over a run.
const PROGRESS_STEPS: usize = 10;

/// Executes trial plans.
#[derive(Debug, Clone)]
pub struct Collector<U = SelfUsage> {
    usage: U,
    iterations: IterationsPerTrial,
}

impl Collector<SelfUsage> {
    /// Collector sampling the current process.
    pub fn new(iterations: IterationsPerTrial) -> Self {
        Self::with_usage(SelfUsage::new(), iterations)
    }
}

impl Default for Collector<SelfUsage> {
    fn default() -> Self {
        Self::new(IterationsPerTrial::default())
    }
}

impl<U: UsageProvider> Collector<U> {
    /// Collector with a custom usage provider.
    pub fn with_usage(usage: U, iterations: IterationsPerTrial) -> Self {
        Self { usage, iterations }
    }

    /// The inner iteration policy.
    pub fn iterations(&self) -> IterationsPerTrial {
        self.iterations
    }

    /// Approximate wall time `measure` will take for `plan`.
    pub fn estimated_duration(&self, plan: &TrialPlan, calibration: &Calibration) -> Duration {
        grid_duration(
            plan.work_units(),
            plan.repetitions(),
            plan.trials_per_bucket(),
            self.iterations,
            calibration,
        )
    }

    /// Run every trial of `plan` in order and bucket the results.
    ///
    /// The first error from the target or the usage provider aborts the run.
    pub fn measure<T: TargetOperation + ?Sized>(
        &self,
        plan: &TrialPlan,
        calibration: &Calibration,
        target: &mut T,
    ) -> Result<ExperimentResults> {
        let mut results = ExperimentResults::for_plan(plan);
        let progress_every = (plan.len() / PROGRESS_STEPS).max(1);

        for (i, tp) in plan.trials().iter().enumerate() {
            let iterations = self.iterations.resolve(tp.repetitions);
            let cost = tp.work_units.saturating_mul(calibration.work_factor);

            let before = self.usage.snapshot()?;
            for _ in 0..iterations {
                let value = work(cost);
                if tp.feature_on {
                    target.invoke(value)?;
                } else {
                    black_box(value);
                }
            }
            let after = self.usage.snapshot()?;

            results.record(tp.bucket(), after.per_iteration_since(&before, iterations))?;

            if (i + 1) % progress_every == 0 {
                debug!(completed = i + 1, total = plan.len(), "measurement progress");
            }
        }

        Ok(results)
    }
}

/// Approximate wall time of measuring a full grid.
///
/// Each trial costs about `(w + feature_on) × iterations` target calls,
/// since `work(w × work_factor)` is calibrated to `w` calls.
pub(crate) fn grid_duration(
    work_units: &[u64],
    repetitions: &[u64],
    trials_per_bucket: usize,
    iterations: IterationsPerTrial,
    calibration: &Calibration,
) -> Duration {
    let calls_per_index: f64 = work_units
        .iter()
        .flat_map(|&w| repetitions.iter().map(move |&r| (w, r)))
        // One on-trial (w + 1 calls) and one off-trial (w calls) per index.
        .map(|(w, r)| (2 * w + 1) as f64 * iterations.resolve(r) as f64)
        .sum();
    let calls = calls_per_index * trials_per_bucket as f64;
    Duration::from_secs_f64(calibration.rough_estimate.as_secs_f64() * calls)
}
