//! Operations under test.
//!
//! The measurement core only sees [`TargetOperation`]. The UDP report
//! sender in [`udp`] is the operation the `udpsend` binary measures.

pub mod message;
pub mod udp;

pub use message::{build_report, KeyValue, PayloadShape, Report};
pub use udp::UdpReportSender;

use crate::error::Result;

/// The discrete operation whose marginal cost is measured.
///
/// `value` is the filler result of the surrounding trial; consuming it keeps
/// the filler computation observable. Any error aborts the run.
pub trait TargetOperation {
    /// Run the operation once.
    fn invoke(&mut self, value: i32) -> Result<()>;
}

impl<F> TargetOperation for F
where
    F: FnMut(i32) -> Result<()>,
{
    fn invoke(&mut self, value: i32) -> Result<()> {
        self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_operations() {
        let mut seen = Vec::new();
        let mut op = |v: i32| -> Result<()> {
            seen.push(v);
            Ok(())
        };
        op.invoke(3).unwrap();
        op.invoke(-1).unwrap();
        assert_eq!(seen, vec![3, -1]);
    }
}
