//! Per-dimension summaries of a timing sample set.

use serde::{Deserialize, Serialize};

use super::online::Stats;
use crate::error::{Error, Result};
use crate::types::Timing;

/// Fewest samples for which an interval is defined.
pub const MIN_SAMPLES_FOR_INTERVAL: usize = 2;

/// Wall, user and sys statistics over one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimingStats {
    /// Wall-clock statistics.
    pub wall: Stats,
    /// User CPU statistics.
    pub user: Stats,
    /// System CPU statistics.
    pub sys: Stats,
}

/// Mean and interval bounds of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Samples summarized.
    pub samples: usize,
    /// Componentwise mean.
    pub mean: Timing,
    /// Lower interval bound.
    pub low: Timing,
    /// Upper interval bound.
    pub high: Timing,
}

impl TimingStats {
    /// Summarize a sample sequence. Order does not matter.
    pub fn new(samples: &[Timing]) -> Self {
        let mut stats = Self::default();
        for t in samples {
            stats.update(t);
        }
        stats
    }

    /// Add one sample.
    pub fn update(&mut self, t: &Timing) {
        self.wall.update(t.wall);
        self.user.update(t.user);
        self.sys.update(t.sys);
    }

    /// Number of samples.
    pub fn count(&self) -> usize {
        self.wall.count()
    }

    /// Componentwise mean.
    pub fn mean(&self) -> Timing {
        Timing::new(self.wall.mean(), self.user.mean(), self.sys.mean())
    }

    /// Componentwise normal-approximation interval `(low, high)`.
    ///
    /// Fails with [`Error::InsufficientSamples`] below two samples.
    pub fn normal_confidence_interval(&self, confidence: f64) -> Result<(Timing, Timing)> {
        let insufficient = || Error::InsufficientSamples {
            available: self.count(),
            required: MIN_SAMPLES_FOR_INTERVAL,
        };
        let (wl, wh) = self
            .wall
            .normal_confidence_interval(confidence)
            .ok_or_else(insufficient)?;
        let (ul, uh) = self
            .user
            .normal_confidence_interval(confidence)
            .ok_or_else(insufficient)?;
        let (sl, sh) = self
            .sys
            .normal_confidence_interval(confidence)
            .ok_or_else(insufficient)?;
        Ok((Timing::new(wl, ul, sl), Timing::new(wh, uh, sh)))
    }

    /// Mean and interval in one value.
    pub fn summary(&self, confidence: f64) -> Result<TimingSummary> {
        let (low, high) = self.normal_confidence_interval(confidence)?;
        Ok(TimingSummary {
            samples: self.count(),
            mean: self.mean(),
            low,
            high,
        })
    }
}
