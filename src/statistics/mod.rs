//! Statistical summaries of timing samples.
//!
//! - Streaming mean/variance ([`Stats`])
//! - Per-dimension bucket summaries with normal-approximation intervals
//!   ([`TimingStats`])
//! - Standard normal quantiles for arbitrary confidence levels

mod normal;
mod online;
mod timing_stats;

pub use normal::{probit, z_score};
pub use online::Stats;
pub use timing_stats::{TimingStats, TimingSummary, MIN_SAMPLES_FOR_INTERVAL};

use crate::types::Timing;

/// Summarize a bucket's samples.
pub fn summarize(samples: &[Timing]) -> TimingStats {
    TimingStats::new(samples)
}
