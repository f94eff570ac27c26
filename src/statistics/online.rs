//! Streaming mean and variance using Welford's algorithm.

use super::normal::z_score;

/// Online statistics accumulator.
///
/// Tracks count, mean and the sum of squared deviations with O(1) memory,
/// avoiding the cancellation of the naive sum-of-squares formula.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Stats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of observations.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean (0 when empty).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance, `None` below two observations.
    pub fn variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation, `None` below two observations.
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Standard error of the mean, `None` below two observations.
    pub fn std_err(&self) -> Option<f64> {
        self.std_dev().map(|sd| sd / (self.count as f64).sqrt())
    }

    /// Normal-approximation interval `mean ± z·stderr`.
    pub fn normal_confidence_interval(&self, confidence: f64) -> Option<(f64, f64)> {
        let half = z_score(confidence) * self.std_err()?;
        Some((self.mean - half, self.mean + half))
    }
}

impl FromIterator<f64> for Stats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Stats::new();
        for x in iter {
            stats.update(x);
        }
        stats
    }
}
