//! Measure the cost of building, encoding and sending a small protobuf
//! report over UDP.
//!
//! Produces a W x R matrix on stdout, where W is the number of work units
//! and R the repetitions value. Logs and the calibration summary go to
//! stderr; set `RUST_LOG=debug` for measurement progress.
//!
//! ```bash
//! cargo run --release --bin udpsend > udpsend.dat
//! ```

use std::io::{self, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use overhead_oracle::output::{format_calibration, format_comparisons};
use overhead_oracle::payload::{udp::DEFAULT_ENDPOINT, PayloadShape, UdpReportSender};
use overhead_oracle::{Experiment, SelfUsage};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut sender = UdpReportSender::bind(DEFAULT_ENDPOINT, PayloadShape::default())
        .context("failed to set up UDP endpoint")?;

    let experiment = Experiment::new();
    let calibration = experiment
        .calibrate(&mut sender)
        .context("calibration failed")?;

    let estimate = experiment.estimated_duration(&calibration);
    eprint!("{}", format_calibration(&calibration, estimate));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = experiment
        .run_calibrated(calibration, SelfUsage::new(), &mut sender, &mut out)
        .context("experiment failed")?;
    out.flush()?;

    eprint!("{}", format_comparisons(&outcome.comparisons));
    Ok(())
}
