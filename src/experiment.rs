//! Main `Experiment` entry point and builder.

use std::io::Write;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::info;

use crate::calibration::{Calibration, Calibrator};
use crate::config::{Config, IterationsPerTrial};
use crate::error::Result;
use crate::measurement::{grid_duration, Collector, SelfUsage, UsageProvider};
use crate::output::{compare, write_comparisons, write_preamble, BucketComparison};
use crate::payload::TargetOperation;
use crate::plan::{build_plan, TrialPlan};
use crate::results::ExperimentResults;

/// Single-experiment harness measuring the marginal cost of one operation.
///
/// Runs in two disjoint phases: measurement (calibrate, plan, execute) and
/// reporting (summarize, render). Everything happens on the calling thread.
///
/// # Example
///
/// ```ignore
/// use overhead_oracle::{Experiment, payload::UdpReportSender};
///
/// let mut sender = UdpReportSender::bind(endpoint, Default::default())?;
/// let outcome = Experiment::new()
///     .work_units(vec![1, 2, 4])
///     .trials(10_000)
///     .run(&mut sender, &mut std::io::stdout().lock())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Experiment {
    config: Config,
}

/// Everything an experiment produced.
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    /// Calibration the trials ran with.
    pub calibration: Calibration,
    /// Raw samples per bucket.
    pub results: ExperimentResults,
    /// On/off comparison per grid point, in grid order.
    pub comparisons: Vec<BucketComparison>,
    /// Seed of the trial order.
    pub seed: u64,
    /// Runtime predicted before measuring.
    pub estimated: Duration,
    /// Actual measurement time.
    pub elapsed: Duration,
}

impl Experiment {
    /// Create with the default (full-size) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the quick smoke-run configuration.
    pub fn quick() -> Self {
        Self::with_config(Config::quick())
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the work-unit axis.
    pub fn work_units(mut self, units: Vec<u64>) -> Self {
        self.config.work_units = units;
        self
    }

    /// Set the repetitions axis.
    pub fn repetitions(mut self, repetitions: Vec<u64>) -> Self {
        self.config.repetitions = repetitions;
        self
    }

    /// Set trials per bucket.
    pub fn trials(mut self, n: usize) -> Self {
        self.config.trials_per_bucket = n;
        self
    }

    /// Set calibration trials per estimate.
    pub fn rough_trials(mut self, n: usize) -> Self {
        self.config.rough_trials = n;
        self
    }

    /// Set the duration of one calibration benchmark.
    pub fn bench_time(mut self, d: Duration) -> Self {
        self.config.bench_time = d;
        self
    }

    /// Set the workload probing constant.
    pub fn probe_units(mut self, units: u64) -> Self {
        self.config.probe_units = units;
        self
    }

    /// Set the inner iteration policy.
    pub fn iterations_per_trial(mut self, iterations: IterationsPerTrial) -> Self {
        self.config.iterations_per_trial = iterations;
        self
    }

    /// Set the confidence level of reported intervals.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.config.confidence = confidence;
        self
    }

    /// Set a deterministic seed for the trial order.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Calibrate, measure, and write the full report to `out`.
    pub fn run<T, W>(&self, target: &mut T, out: &mut W) -> Result<ExperimentOutcome>
    where
        T: TargetOperation + ?Sized,
        W: Write,
    {
        let calibration = self.calibrate(target)?;
        self.run_calibrated(calibration, SelfUsage::new(), target, out)
    }

    /// Calibrate the workload against `target`.
    pub fn calibrate<T: TargetOperation + ?Sized>(&self, target: &mut T) -> Result<Calibration> {
        self.config.validate()?;
        Calibrator::new(
            self.config.rough_trials,
            self.config.bench_time,
            self.config.probe_units,
        )
        .calibrate(target)
    }

    /// Build the randomized trial plan, returning it with its seed.
    pub fn plan(&self) -> (TrialPlan, u64) {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let plan = build_plan(
            &self.config.work_units,
            &self.config.repetitions,
            self.config.trials_per_bucket,
            &mut rng,
        );
        (plan, seed)
    }

    /// Approximate measurement time for the configured grid.
    ///
    /// Same as [`Collector::estimated_duration`] for any plan built from
    /// this configuration.
    pub fn estimated_duration(&self, calibration: &Calibration) -> Duration {
        grid_duration(
            &self.config.work_units,
            &self.config.repetitions,
            self.config.trials_per_bucket,
            self.config.iterations_per_trial,
            calibration,
        )
    }

    /// Measure and report with an existing calibration and usage provider.
    pub fn run_calibrated<U, T, W>(
        &self,
        calibration: Calibration,
        usage: U,
        target: &mut T,
        out: &mut W,
    ) -> Result<ExperimentOutcome>
    where
        U: UsageProvider,
        T: TargetOperation + ?Sized,
        W: Write,
    {
        self.config.validate()?;

        let (plan, seed) = self.plan();
        let collector = Collector::with_usage(usage, self.config.iterations_per_trial);
        let estimated = collector.estimated_duration(&plan, &calibration);
        info!(seed, trials = plan.len(), estimated = ?estimated, "starting measurement");

        write_preamble(
            out,
            plan.work_units(),
            plan.repetitions(),
            &calibration,
            estimated,
        )?;
        out.flush()?;

        let start = Instant::now();
        let results = collector.measure(&plan, &calibration, target)?;
        let elapsed = start.elapsed();
        info!(elapsed = ?elapsed, samples = results.total_samples(), "measurement complete");

        let comparisons = compare(&results, self.config.confidence)?;
        write_comparisons(out, &comparisons, results.repetitions().len())?;
        out.flush()?;

        Ok(ExperimentOutcome {
            calibration,
            results,
            comparisons,
            seed,
            estimated,
            elapsed,
        })
    }
}
