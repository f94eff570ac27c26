//! Colored terminal summaries for stderr.

use colored::Colorize;

use super::report::BucketComparison;
use crate::calibration::Calibration;

/// Format calibration results and the run estimate for a human reader.
pub fn format_calibration(calibration: &Calibration, estimate: std::time::Duration) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("overhead-oracle\n");
    output.push_str(&sep);
    output.push('\n');
    output.push_str(&format!(
        "  Target operation:  ~{:.3?} per call\n",
        calibration.rough_estimate
    ));
    output.push_str(&format!(
        "  Filler work:       {:.3} ns per unit\n",
        calibration.per_unit_secs * 1e9
    ));
    output.push_str(&format!(
        "  Work factor:       {}\n",
        calibration.work_factor.to_string().bold()
    ));
    output.push_str(&format!(
        "  Estimated runtime: {}\n",
        format!("{:.1?}", estimate).cyan()
    ));
    output.push_str(&sep);
    output.push('\n');
    output
}

/// One line per grid point: mean wall-time effect, colored by whether the
/// on/off intervals separate.
pub fn format_comparisons(comparisons: &[BucketComparison]) -> String {
    let mut output = String::new();
    for c in comparisons {
        let verdict = if c.spread.wall > 0.0 {
            "separated".green()
        } else {
            "overlapping".yellow()
        };
        output.push_str(&format!(
            "  W/R={:>6}/{:<4} effect {:>10.3} us  ({})\n",
            c.work_units,
            c.repetitions,
            c.mean_diff.wall * 1e6,
            verdict
        ));
    }
    output
}
