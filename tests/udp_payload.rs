//! The UDP report operation against a real loopback socket.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use overhead_oracle::payload::{PayloadShape, Report, UdpReportSender};
use overhead_oracle::{Error, TargetOperation};
use prost::Message;

fn ephemeral() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 0))
}

#[test]
fn invoked_reports_arrive_decodable() {
    let shape = PayloadShape {
        num_keys: 3,
        key_size: 4,
        val_size: 6,
    };
    let mut sender = UdpReportSender::bind(ephemeral(), shape).unwrap();
    sender
        .receiver()
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();

    sender.invoke(1234).unwrap();

    let mut buf = [0u8; 1024];
    let n = sender.receiver().recv(&mut buf).unwrap();
    let report = Report::decode(&buf[..n]).unwrap();
    assert_eq!(report.id, 1234);
    assert_eq!(report.field.len(), 3);
    assert_eq!(report.field[0].key, "kkkk");
    assert_eq!(report.field[2].value, "vvvvvv");
}

#[test]
fn repeated_sends_do_not_fail_when_unread() {
    let mut sender = UdpReportSender::bind(ephemeral(), PayloadShape::default()).unwrap();
    for i in 0..10_000 {
        sender.invoke(i).unwrap();
    }
}

#[test]
fn second_bind_on_same_endpoint_is_a_setup_error() {
    let first = UdpReportSender::bind(ephemeral(), PayloadShape::default()).unwrap();
    let addr = first.local_addr().unwrap();
    let err = UdpReportSender::bind(addr, PayloadShape::default()).unwrap_err();
    match err {
        Error::Setup { addr: failed, .. } => assert_eq!(failed, addr),
        other => panic!("expected setup error, got {other:?}"),
    }
}
