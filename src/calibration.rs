//! One-shot calibration of the filler workload against the target operation.
//!
//! Both the target operation and a large fixed workload probe are benchmarked
//! in isolation across several trials. The work factor is chosen so that
//! `work(work_factor)` costs about as much as one target invocation.
//!
//! Calibration runs once, before measurement, and is never repeated. Drift
//! during the run is left to the randomized trial order to cancel.

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::measurement::work;
use crate::payload::TargetOperation;
use crate::statistics::Stats;

/// Upper bound on calls per benchmark round.
const MAX_BENCH_CALLS: u64 = 1_000_000_000;

/// Frozen calibration result, read by every trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    /// Typical cost of one target invocation.
    pub rough_estimate: Duration,
    /// Cost of one unit of filler work, in seconds.
    pub per_unit_secs: f64,
    /// Units of filler work costing about one target invocation.
    pub work_factor: u64,
}

impl Calibration {
    /// Build a calibration from measured costs.
    ///
    /// A work factor that floors to zero (target cheaper than one unit of
    /// work) is raised to 1.
    pub fn from_costs(rough_estimate: Duration, per_unit_secs: f64, probe_units: u64) -> Result<Self> {
        if !(per_unit_secs.is_finite() && per_unit_secs > 0.0) {
            return Err(Error::DegenerateCalibration {
                probe_units,
                per_unit_secs,
            });
        }
        let factor = (rough_estimate.as_secs_f64() / per_unit_secs).floor();
        let work_factor = if factor < 1.0 {
            warn!(
                rough_estimate = ?rough_estimate,
                per_unit_secs, "target is cheaper than one unit of work; using work factor 1"
            );
            1
        } else {
            factor as u64
        };
        Ok(Self {
            rough_estimate,
            per_unit_secs,
            work_factor,
        })
    }
}

/// Benchmarks the target and the workload to derive a [`Calibration`].
#[derive(Debug, Clone, Copy)]
pub struct Calibrator {
    /// Trials averaged per estimate.
    pub trials: usize,
    /// Minimum duration of one benchmark round.
    pub bench_time: Duration,
    /// Units of work per probe call.
    pub probe_units: u64,
}

impl Calibrator {
    /// Create a calibrator.
    pub fn new(trials: usize, bench_time: Duration, probe_units: u64) -> Self {
        Self {
            trials,
            bench_time,
            probe_units,
        }
    }

    /// Estimate the target's cost and the matching work factor.
    ///
    /// Errors from the target abort calibration.
    pub fn calibrate<T: TargetOperation + ?Sized>(&self, target: &mut T) -> Result<Calibration> {
        let mut rough = Stats::new();
        let mut unit = Stats::new();
        let probe = self.probe_units;

        for _ in 0..self.trials {
            rough.update(bench_per_call(self.bench_time, || target.invoke(i32::MAX))?);

            let per_probe = bench_per_call(self.bench_time, || {
                black_box(work(probe));
                Ok(())
            })?;
            unit.update(per_probe / probe as f64);
        }

        let rough_estimate = Duration::from_secs_f64(rough.mean().max(0.0));
        let calibration = Calibration::from_costs(rough_estimate, unit.mean(), probe)?;
        info!(
            rough_estimate = ?calibration.rough_estimate,
            per_unit_secs = calibration.per_unit_secs,
            work_factor = calibration.work_factor,
            "calibration complete"
        );
        Ok(calibration)
    }
}

/// Seconds per call of `f`, benchmarked until one round lasts `bench_time`.
///
/// Starts with a single call and grows the call count from the observed
/// rate (overshooting by 20%, at most 100x per round), so that slow and
/// fast operations both get a round of about `bench_time`.
pub fn bench_per_call<F>(bench_time: Duration, mut f: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let mut n: u64 = 1;
    loop {
        let start = Instant::now();
        for _ in 0..n {
            f()?;
        }
        let elapsed = start.elapsed();

        if elapsed >= bench_time || n >= MAX_BENCH_CALLS {
            return Ok(elapsed.as_secs_f64() / n as f64);
        }

        let per_call = elapsed.as_secs_f64() / n as f64;
        let predicted = if per_call > 0.0 {
            (bench_time.as_secs_f64() / per_call * 1.2) as u64
        } else {
            n.saturating_mul(100)
        };
        n = predicted
            .min(n.saturating_mul(100))
            .max(n + 1)
            .min(MAX_BENCH_CALLS);
    }
}
