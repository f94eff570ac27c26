//! Error type shared by every stage of an experiment.
//!
//! All failures are fatal: nothing in the harness retries, and a failed run
//! produces no partial report.

use std::io;
use std::net::SocketAddr;

use crate::types::BucketKey;

/// Errors produced while setting up, running, or reporting an experiment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The environment could not provide an endpoint the target operation needs.
    #[error("failed to bind endpoint {addr}: {source}")]
    Setup {
        /// Address we attempted to bind.
        addr: SocketAddr,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The payload could not be serialized.
    #[error("payload encoding failed: {0}")]
    Encode(#[from] prost::EncodeError),

    /// The transport rejected a payload.
    #[error("payload send failed: {0}")]
    Send(#[source] io::Error),

    /// The host refused to report process resource usage.
    #[error("resource usage unavailable: {0}")]
    Usage(#[source] io::Error),

    /// Calibration produced a per-unit workload cost that cannot be divided by.
    #[error(
        "workload probe of {probe_units} units measured {per_unit_secs:e} s per unit; \
         increase the probing constant"
    )]
    DegenerateCalibration {
        /// Units of work per probe call.
        probe_units: u64,
        /// Measured cost of a single unit, in seconds.
        per_unit_secs: f64,
    },

    /// Too few samples to form a confidence interval.
    #[error("confidence interval needs at least {required} samples, got {available}")]
    InsufficientSamples {
        /// Number of samples available.
        available: usize,
        /// Minimum required.
        required: usize,
    },

    /// A reported bucket holds too few samples; the trial count is misconfigured.
    #[error("bucket {key} holds {samples} samples; at least 2 are required")]
    DegenerateBucket {
        /// The offending bucket.
        key: BucketKey,
        /// Samples collected for it.
        samples: usize,
    },

    /// A sample was recorded for a bucket outside the experiment grid.
    #[error("bucket {0} is not part of the experiment grid")]
    UnknownBucket(BucketKey),

    /// The experiment configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing the report failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
