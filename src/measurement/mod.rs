//! Measurement infrastructure.
//!
//! This module provides:
//! - Process resource usage snapshots (wall, user and system time)
//! - The calibrated filler workload
//! - Trial execution over a randomized plan
//!
//! # Resource usage
//!
//! CPU times come from `getrusage(RUSAGE_SELF)` and are therefore
//! process-wide. Their resolution is platform dependent (often 1-4 ms on
//! Linux), which is why many trials per bucket are needed: the mean of a
//! coarse counter still converges.

mod collector;
mod usage;
mod workload;

pub use collector::Collector;
pub(crate) use collector::grid_duration;
pub use usage::{ResourceSnapshot, SelfUsage, UsageProvider};
pub use workload::work;
