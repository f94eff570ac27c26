//! Configuration for an overhead experiment.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::{Error, Result};

/// Minimum number of calibration trials averaged for each estimate.
pub const MIN_ROUGH_TRIALS: usize = 10;

/// Configuration options for `Experiment`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Work-unit axis of the parameter grid, in report order.
    pub work_units: Vec<u64>,

    /// Repetitions axis of the parameter grid, in report order (default: `[10]`).
    pub repetitions: Vec<u64>,

    /// Trials per (feature, work units, repetitions) bucket (default: 50,000).
    pub trials_per_bucket: usize,

    /// Calibration trials averaged per estimate (default: 10).
    pub rough_trials: usize,

    /// Target wall time of one calibration benchmark (default: 1s).
    pub bench_time: Duration,

    /// Units of work per calibration probe call (default: 1e8).
    ///
    /// Must be large enough that one probe is far above timer resolution,
    /// otherwise the per-unit cost rounds to zero.
    pub probe_units: u64,

    /// Inner loop count of every trial (default: `Fixed(10)`).
    pub iterations_per_trial: IterationsPerTrial,

    /// Two-sided confidence level for interval estimates (default: 0.95).
    pub confidence: f64,

    /// Optional deterministic seed for trial ordering.
    pub seed: Option<u64>,
}

/// How many times a trial repeats its work before the closing snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationsPerTrial {
    /// Always run exactly N iterations; the repetitions value only labels
    /// the bucket.
    Fixed(usize),

    /// Run as many iterations as the trial's repetitions value.
    FromRepetitions,
}

impl Default for IterationsPerTrial {
    fn default() -> Self {
        Self::Fixed(10)
    }
}

impl IterationsPerTrial {
    /// Resolve the inner loop count for a trial with the given repetitions label.
    pub fn resolve(&self, repetitions: u64) -> usize {
        match self {
            Self::Fixed(n) => *n,
            Self::FromRepetitions => repetitions as usize,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut work_units = unit_range(100, 1900, 100);
        work_units.extend(unit_range(2000, 10_000, 1000));
        Self {
            work_units,
            repetitions: unit_range(10, 10, 1),
            trials_per_bucket: 50_000,
            rough_trials: MIN_ROUGH_TRIALS,
            bench_time: Duration::from_secs(1),
            probe_units: 100_000_000,
            iterations_per_trial: IterationsPerTrial::default(),
            confidence: 0.95,
            seed: None,
        }
    }
}

impl Config {
    /// Small grid and short calibration for smoke runs.
    ///
    /// Settings:
    /// - work units 1, 2, 4
    /// - 2,000 trials per bucket
    /// - 50 ms calibration benchmarks with a 1e6-unit probe
    pub fn quick() -> Self {
        Self {
            work_units: vec![1, 2, 4],
            trials_per_bucket: 2_000,
            bench_time: Duration::from_millis(50),
            probe_units: 1_000_000,
            ..Self::default()
        }
    }

    /// Check that the configuration can produce a meaningful report.
    pub fn validate(&self) -> Result<()> {
        check_axis("work_units", &self.work_units)?;
        check_axis("repetitions", &self.repetitions)?;
        if self.trials_per_bucket < 2 {
            return Err(Error::InvalidConfig(format!(
                "trials_per_bucket must be at least 2 to form a confidence interval, got {}",
                self.trials_per_bucket
            )));
        }
        if self.rough_trials < MIN_ROUGH_TRIALS {
            return Err(Error::InvalidConfig(format!(
                "rough_trials must be at least {}, got {}",
                MIN_ROUGH_TRIALS, self.rough_trials
            )));
        }
        if self.probe_units == 0 {
            return Err(Error::InvalidConfig("probe_units must be positive".into()));
        }
        if self.bench_time.is_zero() {
            return Err(Error::InvalidConfig("bench_time must be positive".into()));
        }
        if self.iterations_per_trial == IterationsPerTrial::Fixed(0) {
            return Err(Error::InvalidConfig(
                "iterations_per_trial must be positive".into(),
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "confidence must lie in (0, 1), got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

fn check_axis(name: &str, values: &[u64]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::InvalidConfig(format!("{name} must not be empty")));
    }
    if values.contains(&0) {
        return Err(Error::InvalidConfig(format!("{name} values must be positive")));
    }
    let mut seen = HashSet::with_capacity(values.len());
    if let Some(dup) = values.iter().find(|v| !seen.insert(**v)) {
        return Err(Error::InvalidConfig(format!("{name} repeats the value {dup}")));
    }
    Ok(())
}

/// Inclusive range `low..=high` stepping by `step`.
pub fn unit_range(low: u64, high: u64, step: u64) -> Vec<u64> {
    (low..=high).step_by(step.max(1) as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_layout() {
        let config = Config::default();
        assert_eq!(config.work_units.len(), 19 + 9);
        assert_eq!(config.work_units.first(), Some(&100));
        assert_eq!(config.work_units[18], 1900);
        assert_eq!(config.work_units[19], 2000);
        assert_eq!(config.work_units.last(), Some(&10_000));
        assert_eq!(config.repetitions, vec![10]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn quick_preset_is_valid() {
        assert!(Config::quick().validate().is_ok());
    }

    #[test]
    fn unit_range_is_inclusive() {
        assert_eq!(unit_range(10, 10, 1), vec![10]);
        assert_eq!(unit_range(1, 7, 3), vec![1, 4, 7]);
        assert!(unit_range(5, 1, 1).is_empty());
    }

    #[test]
    fn rejects_degenerate_settings() {
        let too_few = Config {
            trials_per_bucket: 1,
            ..Config::quick()
        };
        assert!(matches!(too_few.validate(), Err(Error::InvalidConfig(_))));

        let duplicate = Config {
            work_units: vec![1, 2, 1],
            ..Config::quick()
        };
        assert!(matches!(duplicate.validate(), Err(Error::InvalidConfig(_))));

        let empty = Config {
            repetitions: vec![],
            ..Config::quick()
        };
        assert!(matches!(empty.validate(), Err(Error::InvalidConfig(_))));

        let confidence = Config {
            confidence: 1.0,
            ..Config::quick()
        };
        assert!(matches!(confidence.validate(), Err(Error::InvalidConfig(_))));

        let rough = Config {
            rough_trials: 3,
            ..Config::quick()
        };
        assert!(matches!(rough.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn iterations_resolve() {
        assert_eq!(IterationsPerTrial::Fixed(10).resolve(3), 10);
        assert_eq!(IterationsPerTrial::FromRepetitions.resolve(3), 3);
    }
}
