//! Trial parameters, bucket keys and normalized timings.

use std::fmt;
use std::ops::{Add, Div, Sub};

use serde::{Deserialize, Serialize};

/// One entry of the trial plan.
///
/// Identifies the bucket a trial reports into and whether the target
/// operation runs during that trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialParameter {
    /// Multiplier applied to the calibrated work factor.
    pub work_units: u64,
    /// Repetitions axis label (see `IterationsPerTrial`).
    pub repetitions: u64,
    /// Whether the target operation is invoked.
    pub feature_on: bool,
}

impl TrialParameter {
    /// Create a new trial parameter.
    pub fn new(work_units: u64, repetitions: u64, feature_on: bool) -> Self {
        Self {
            work_units,
            repetitions,
            feature_on,
        }
    }

    /// Bucket this trial's sample belongs to.
    pub fn bucket(&self) -> BucketKey {
        BucketKey::new(self.feature_on, self.work_units, self.repetitions)
    }
}

/// Composite key identifying a bucket of samples.
///
/// Ordering is (work units, repetitions, feature flag) so iteration over a
/// `BTreeMap` follows the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketKey {
    /// Work units of the bucket.
    pub work_units: u64,
    /// Repetitions label of the bucket.
    pub repetitions: u64,
    /// Feature flag of the bucket.
    pub feature_on: bool,
}

impl BucketKey {
    /// Create a new bucket key.
    pub fn new(feature_on: bool, work_units: u64, repetitions: u64) -> Self {
        Self {
            work_units,
            repetitions,
            feature_on,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "W/R={}/{} ({})",
            self.work_units,
            self.repetitions,
            if self.feature_on { "on" } else { "off" }
        )
    }
}

/// Wall, user and system time of one normalized measurement, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Elapsed wall-clock time.
    pub wall: f64,
    /// User CPU time.
    pub user: f64,
    /// System CPU time.
    pub sys: f64,
}

impl Timing {
    /// Create a timing from its three components.
    pub fn new(wall: f64, user: f64, sys: f64) -> Self {
        Self { wall, user, sys }
    }

    /// Components in report order: wall, user, sys.
    pub fn components(&self) -> [f64; 3] {
        [self.wall, self.user, self.sys]
    }
}

impl Add for Timing {
    type Output = Timing;

    fn add(self, rhs: Timing) -> Timing {
        Timing::new(self.wall + rhs.wall, self.user + rhs.user, self.sys + rhs.sys)
    }
}

impl Sub for Timing {
    type Output = Timing;

    fn sub(self, rhs: Timing) -> Timing {
        Timing::new(self.wall - rhs.wall, self.user - rhs.user, self.sys - rhs.sys)
    }
}

impl Div<f64> for Timing {
    type Output = Timing;

    fn div(self, rhs: f64) -> Timing {
        Timing::new(self.wall / rhs, self.user / rhs, self.sys / rhs)
    }
}

/// Microsecond rendering used by the summary lines.
impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{wall={:.3}us user={:.3}us sys={:.3}us}}",
            self.wall * 1e6,
            self.user * 1e6,
            self.sys * 1e6
        )
    }
}
