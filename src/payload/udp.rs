//! Blocking UDP transport for encoded reports.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use tracing::debug;

use super::message::{build_report, encode_report, PayloadShape};
use super::TargetOperation;
use crate::error::{Error, Result};

/// Default receiving endpoint.
pub const DEFAULT_ENDPOINT: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 1026);

/// Builds, encodes and sends one report per invocation.
///
/// Owns both ends of the exchange: a receiving socket bound at the endpoint
/// (so sends never bounce off a closed port) and a sending socket connected
/// to it. Received datagrams are never read; the kernel drops them once the
/// receive buffer fills.
#[derive(Debug)]
pub struct UdpReportSender {
    sender: UdpSocket,
    receiver: UdpSocket,
    shape: PayloadShape,
}

impl UdpReportSender {
    /// Bind the endpoint and connect a sender to it.
    ///
    /// Port 0 binds an ephemeral port; see [`local_addr`](Self::local_addr).
    pub fn bind(endpoint: SocketAddr, shape: PayloadShape) -> Result<Self> {
        let setup = |source| Error::Setup {
            addr: endpoint,
            source,
        };
        let receiver = UdpSocket::bind(endpoint).map_err(setup)?;
        let target = receiver.local_addr().map_err(setup)?;

        let unspecified = match target.ip() {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };
        let sender = UdpSocket::bind(SocketAddr::new(unspecified, 0)).map_err(setup)?;
        sender.connect(target).map_err(setup)?;
        debug!(%target, "udp report sender connected");

        Ok(Self {
            sender,
            receiver,
            shape,
        })
    }

    /// Address of the receiving endpoint.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.receiver.local_addr().map_err(Error::Send)
    }

    /// Receiving socket, for callers that want to inspect sent datagrams.
    pub fn receiver(&self) -> &UdpSocket {
        &self.receiver
    }

    /// Build, encode and send a single report.
    pub fn send(&self, id: i32) -> Result<usize> {
        let report = build_report(id, self.shape);
        let bytes = encode_report(&report)?;
        self.sender.send(&bytes).map_err(Error::Send)
    }
}

impl TargetOperation for UdpReportSender {
    fn invoke(&mut self, value: i32) -> Result<()> {
        self.send(value).map(|_| ())
    }
}
