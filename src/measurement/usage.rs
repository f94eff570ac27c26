//! Process resource usage snapshots.
//!
//! Wall time comes from a monotonic `Instant` epoch; user and system CPU
//! time come from `getrusage(RUSAGE_SELF)`, which covers every thread of
//! the process.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::types::Timing;

/// Point-in-time resource usage of the process.
///
/// Every field is non-decreasing across the lifetime of one provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceSnapshot {
    /// Wall-clock time since the provider's epoch.
    pub wall: Duration,
    /// Cumulative user CPU time.
    pub user: Duration,
    /// Cumulative system CPU time.
    pub sys: Duration,
}

impl ResourceSnapshot {
    /// Usage accumulated between `earlier` and `self`, divided by `divisor`.
    ///
    /// Components saturate at zero if a clock steps backwards.
    pub fn per_iteration_since(&self, earlier: &ResourceSnapshot, divisor: usize) -> Timing {
        let n = divisor.max(1) as f64;
        Timing::new(
            self.wall.saturating_sub(earlier.wall).as_secs_f64() / n,
            self.user.saturating_sub(earlier.user).as_secs_f64() / n,
            self.sys.saturating_sub(earlier.sys).as_secs_f64() / n,
        )
    }
}

/// Source of resource usage snapshots.
pub trait UsageProvider {
    /// Take a snapshot of current process usage.
    fn snapshot(&self) -> Result<ResourceSnapshot>;
}

/// Usage of the current process.
#[derive(Debug, Clone, Copy)]
pub struct SelfUsage {
    epoch: Instant,
}

impl SelfUsage {
    /// Create a provider whose wall clock starts now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SelfUsage {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageProvider for SelfUsage {
    fn snapshot(&self) -> Result<ResourceSnapshot> {
        let wall = self.epoch.elapsed();
        let (user, sys) = cpu_times()?;
        Ok(ResourceSnapshot { wall, user, sys })
    }
}

#[cfg(unix)]
fn cpu_times() -> Result<(Duration, Duration)> {
    use std::mem::MaybeUninit;

    let mut usage = MaybeUninit::<libc::rusage>::uninit();
    // SAFETY: getrusage fully initializes the struct when it returns 0.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return Err(crate::Error::Usage(std::io::Error::last_os_error()));
    }
    // SAFETY: checked rc above.
    let usage = unsafe { usage.assume_init() };
    Ok((timeval(usage.ru_utime), timeval(usage.ru_stime)))
}

#[cfg(unix)]
fn timeval(tv: libc::timeval) -> Duration {
    Duration::from_secs(tv.tv_sec.max(0) as u64) + Duration::from_micros(tv.tv_usec.max(0) as u64)
}

#[cfg(not(unix))]
fn cpu_times() -> Result<(Duration, Duration)> {
    Ok((Duration::ZERO, Duration::ZERO))
}
