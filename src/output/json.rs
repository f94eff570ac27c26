//! JSON serialization of bucket comparisons.

use super::report::BucketComparison;

/// Serialize comparisons to a compact JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for comparisons).
pub fn to_json(comparisons: &[BucketComparison]) -> Result<String, serde_json::Error> {
    serde_json::to_string(comparisons)
}

/// Serialize comparisons to a pretty-printed JSON array.
///
/// # Errors
///
/// See [`to_json`].
pub fn to_json_pretty(comparisons: &[BucketComparison]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::TimingSummary;
    use crate::types::Timing;

    fn make_comparison() -> BucketComparison {
        let on = TimingSummary {
            samples: 1000,
            mean: Timing::new(2e-4, 1e-4, 0.5e-4),
            low: Timing::new(1.9e-4, 0.9e-4, 0.4e-4),
            high: Timing::new(2.1e-4, 1.1e-4, 0.6e-4),
        };
        let off = TimingSummary {
            samples: 1000,
            mean: Timing::new(1e-4, 1e-4, 0.0),
            low: Timing::new(0.9e-4, 0.9e-4, 0.0),
            high: Timing::new(1.1e-4, 1.1e-4, 0.0),
        };
        BucketComparison {
            work_units: 100,
            repetitions: 10,
            on,
            off,
            mean_diff: on.mean - off.mean,
            spread: on.low - off.high,
        }
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&[make_comparison()]).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"work_units\":100"));
        assert!(json.contains("\"mean_diff\""));
    }

    #[test]
    fn test_json_keeps_full_precision() {
        let mut comparison = make_comparison();
        comparison.spread.user = -1.9999999999999998e-5;
        let json = to_json(&[comparison]).unwrap();
        let parsed: Vec<BucketComparison> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].spread.user.to_bits(), comparison.spread.user.to_bits());
    }

    #[test]
    fn test_json_round_trip() {
        let original = make_comparison();
        let json = to_json_pretty(&[original]).unwrap();
        assert!(json.contains('\n'));
        let parsed: Vec<BucketComparison> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![original]);
    }
}
