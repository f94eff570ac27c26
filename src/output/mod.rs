//! Report rendering.
//!
//! - [`report`]: the plain-text report (stdout, plotting input)
//! - [`terminal`]: colored summaries for stderr
//! - [`json`]: machine-readable comparisons

pub mod json;
pub mod report;
pub mod terminal;

pub use json::{to_json, to_json_pretty};
pub use report::{compare, write_comparisons, write_preamble, write_report, BucketComparison};
pub use terminal::{format_calibration, format_comparisons};
