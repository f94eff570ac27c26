//! Plain-text report for humans and plotting tools.
//!
//! Layout:
//! 1. Preamble lines starting with `#` (grid, calibration, run estimate)
//! 2. One `# W/R=w/r MDIFF=… SPREAD=…` line per grid point
//! 3. Dense numeric rows grouped by repetitions, each group followed by a
//!    blank line. Columns: `w r`, then wall, user and sys, each as
//!    on mean, on low, on high, off mean, off low, off high (seconds).
//!
//! With gnuplot, the wall-time effect and its band are
//! `using 1:($3-$6)` and `using 1:($4-$6):($5-$6) with filledcurves`.

use std::io::Write;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::error::{Error, Result};
use crate::results::ExperimentResults;
use crate::statistics::{summarize, TimingSummary, MIN_SAMPLES_FOR_INTERVAL};
use crate::types::{BucketKey, Timing};

/// On/off comparison for one (work units, repetitions) grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketComparison {
    /// Work units of the grid point.
    pub work_units: u64,
    /// Repetitions of the grid point.
    pub repetitions: u64,
    /// Feature-on summary.
    pub on: TimingSummary,
    /// Feature-off summary.
    pub off: TimingSummary,
    /// `on.mean - off.mean`.
    pub mean_diff: Timing,
    /// `on.low - off.high`: a worst-case lower bound on the effect.
    /// Positive when the two intervals separate.
    pub spread: Timing,
}

impl BucketComparison {
    fn new(work_units: u64, repetitions: u64, on: TimingSummary, off: TimingSummary) -> Self {
        Self {
            work_units,
            repetitions,
            on,
            off,
            mean_diff: on.mean - off.mean,
            spread: on.low - off.high,
        }
    }
}

/// Compare on/off buckets for every grid point, in (w, r) grid order.
///
/// Fails with [`Error::DegenerateBucket`] if any bucket has fewer than two
/// samples.
pub fn compare(results: &ExperimentResults, confidence: f64) -> Result<Vec<BucketComparison>> {
    let mut comparisons =
        Vec::with_capacity(results.work_units().len() * results.repetitions().len());
    for &w in results.work_units() {
        for &r in results.repetitions() {
            let on = bucket_summary(results, BucketKey::new(true, w, r), confidence)?;
            let off = bucket_summary(results, BucketKey::new(false, w, r), confidence)?;
            comparisons.push(BucketComparison::new(w, r, on, off));
        }
    }
    Ok(comparisons)
}

fn bucket_summary(
    results: &ExperimentResults,
    key: BucketKey,
    confidence: f64,
) -> Result<TimingSummary> {
    let samples = results.samples(&key).ok_or(Error::UnknownBucket(key))?;
    if samples.len() < MIN_SAMPLES_FOR_INTERVAL {
        return Err(Error::DegenerateBucket {
            key,
            samples: samples.len(),
        });
    }
    summarize(samples).summary(confidence)
}

/// Write the `#` preamble describing the grid and calibration.
pub fn write_preamble<W: Write>(
    out: &mut W,
    work_units: &[u64],
    repetitions: &[u64],
    calibration: &Calibration,
    estimate: Duration,
) -> Result<()> {
    writeln!(out, "# work params {}", format_axis(work_units))?;
    writeln!(out, "# repeat params {}", format_axis(repetitions))?;
    writeln!(out, "# rough estimate {:.3?}", calibration.rough_estimate)?;
    writeln!(out, "# work timing {:e} s per unit", calibration.per_unit_secs)?;
    writeln!(out, "# work factor {}", calibration.work_factor)?;
    writeln!(out, "# experiments will take approximately {:.1?}", estimate)?;
    Ok(())
}

/// Write summary lines and the numeric matrix for a frozen result set.
///
/// Output depends only on `results` and `confidence`, so repeated calls
/// produce identical bytes.
pub fn write_report<W: Write>(
    out: &mut W,
    results: &ExperimentResults,
    confidence: f64,
) -> Result<()> {
    let comparisons = compare(results, confidence)?;
    write_comparisons(out, &comparisons, results.repetitions().len())
}

/// Write summary lines and the numeric matrix from precomputed comparisons.
///
/// `comparisons` must be in (w, r) grid order with `repetition_count`
/// repetitions per work-unit value, as returned by [`compare`].
pub fn write_comparisons<W: Write>(
    out: &mut W,
    comparisons: &[BucketComparison],
    repetition_count: usize,
) -> Result<()> {
    for c in comparisons {
        writeln!(
            out,
            "# W/R={}/{} MDIFF={} SPREAD={}",
            c.work_units, c.repetitions, c.mean_diff, c.spread
        )?;
    }

    if repetition_count == 0 {
        return Ok(());
    }
    for ri in 0..repetition_count {
        for c in comparisons.iter().skip(ri).step_by(repetition_count) {
            write_row(out, c)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, c: &BucketComparison) -> Result<()> {
    write!(out, "{} {}", c.work_units, c.repetitions)?;
    for dim in 0..3 {
        for summary in [&c.on, &c.off] {
            for value in [summary.mean, summary.low, summary.high] {
                write!(out, " {:.9}", value.components()[dim])?;
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

fn format_axis(values: &[u64]) -> String {
    let joined: Vec<String> = values.iter().map(u64::to_string).collect();
    format!("[{}]", joined.join(" "))
}
