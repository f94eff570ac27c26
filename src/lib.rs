//! # overhead-oracle
//!
//! Measure the marginal wall, user and system time of a small, discrete
//! operation (for example, building and sending one UDP report) against
//! ambient measurement noise.
//!
//! The harness interleaves "feature-on" trials (filler work plus the target
//! operation) with "feature-off" trials (filler work only) in a uniformly
//! random order, then separates the two statistically:
//! - Calibrated filler work whose cost matches one target invocation
//! - Randomized trial plan over a (work units × repetitions) grid
//! - Per-bucket resource usage samples, normalized per iteration
//! - Normal-approximation confidence intervals per bucket
//! - A text report with mean differences and a plotting matrix
//!
//! ## Quick Start
//!
//! ```ignore
//! use overhead_oracle::Experiment;
//!
//! let mut target = |value: i32| -> overhead_oracle::Result<()> {
//!     my_operation(value);
//!     Ok(())
//! };
//!
//! let outcome = Experiment::quick().run(&mut target, &mut std::io::stdout().lock())?;
//! for c in &outcome.comparisons {
//!     println!("w={} effect {:.3}us", c.work_units, c.mean_diff.wall * 1e6);
//! }
//! ```
//!
//! Everything runs on one thread. Concurrency would add exactly the
//! scheduling noise the randomized order is meant to cancel.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod calibration;
mod config;
mod error;
mod experiment;
mod plan;
mod results;
mod types;

// Functional modules
pub mod measurement;
pub mod output;
pub mod payload;
pub mod statistics;

// Re-exports for public API
pub use calibration::{bench_per_call, Calibration, Calibrator};
pub use config::{unit_range, Config, IterationsPerTrial, MIN_ROUGH_TRIALS};
pub use error::{Error, Result};
pub use experiment::{Experiment, ExperimentOutcome};
pub use measurement::{work, Collector, ResourceSnapshot, SelfUsage, UsageProvider};
pub use output::BucketComparison;
pub use payload::TargetOperation;
pub use plan::{build_plan, TrialPlan};
pub use results::ExperimentResults;
pub use statistics::{summarize, TimingStats, TimingSummary};
pub use types::{BucketKey, Timing, TrialParameter};
