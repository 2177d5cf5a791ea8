//! Top-level frame parser
//!
//! Maps a raw captured frame to a `PacketRecord` or a per-frame
//! `ParseError`. Absence (or unusability) of the network-layer header
//! is the only failure; malformed inner layers degrade to OTHER.

use crate::ethernet::{self, EtherType};
use crate::ip;
use crate::transport;
use netpulse_core::{PacketRecord, ParseError, Protocol, ProtocolDetail, RawFrame};

/// Parse a raw frame into an immutable packet record.
///
/// Pure and deterministic: identical input always yields an identical
/// record or an identical error.
pub fn parse(frame: &RawFrame) -> std::result::Result<PacketRecord, ParseError> {
    let (ether_type, offset) =
        ethernet::network_payload(&frame.data).ok_or(ParseError::NoNetworkLayer)?;

    let network = &frame.data[offset..];
    let header = match ether_type {
        EtherType::Ipv4 => ip::parse_ipv4(network).ok_or(ParseError::TruncatedNetworkHeader)?,
        EtherType::Ipv6 => ip::parse_ipv6(network).ok_or(ParseError::TruncatedNetworkHeader)?,
        _ => return Err(ParseError::NoNetworkLayer),
    };

    let payload = network.get(header.payload_offset..).unwrap_or(&[]);
    let (protocol, detail) = classify(header.protocol, payload);

    Ok(PacketRecord {
        timestamp: frame.timestamp,
        source: header.source,
        destination: header.destination,
        protocol,
        detail,
        length: frame.len,
    })
}

/// Classify the transport layer. Truncated TCP/UDP headers degrade to
/// OTHER with no detail rather than failing the frame.
fn classify(protocol: u8, payload: &[u8]) -> (Protocol, ProtocolDetail) {
    match protocol {
        ip::PROTO_TCP => match transport::parse_tcp(payload) {
            Some(tcp) => (
                Protocol::Tcp,
                ProtocolDetail::Tcp {
                    source_port: tcp.source_port,
                    dest_port: tcp.dest_port,
                    flags: tcp.flags,
                },
            ),
            None => (Protocol::Other, ProtocolDetail::None),
        },
        ip::PROTO_UDP => match transport::parse_udp(payload) {
            Some(udp) => (
                Protocol::Udp,
                ProtocolDetail::Udp {
                    source_port: udp.source_port,
                    dest_port: udp.dest_port,
                },
            ),
            None => (Protocol::Other, ProtocolDetail::None),
        },
        ip::PROTO_ICMP | ip::PROTO_ICMPV6 => (Protocol::Icmp, ProtocolDetail::None),
        _ => (Protocol::Other, ProtocolDetail::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::{Duration, UNIX_EPOCH};

    fn ethernet_header(ether_type: u16) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_slice(&[0xAA; 6]); // dst MAC
        buf.put_slice(&[0xBB; 6]); // src MAC
        buf.put_u16(ether_type);
        buf
    }

    fn ipv4_header(protocol: u8, src: [u8; 4], dst: [u8; 4]) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_u8(0x45); // version 4, IHL 5
        buf.put_u8(0); // ToS
        buf.put_u16(0); // total length (unused by the parser)
        buf.put_u32(0); // id + flags/frag
        buf.put_u8(64); // TTL
        buf.put_u8(protocol);
        buf.put_u16(0); // checksum
        buf.put_slice(&src);
        buf.put_slice(&dst);
        buf
    }

    fn tcp_header(source_port: u16, dest_port: u16, flags: u8) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_u16(source_port);
        buf.put_u16(dest_port);
        buf.put_u32(1000); // seq
        buf.put_u32(0); // ack
        buf.put_u8(0x50); // data offset 5
        buf.put_u8(flags);
        buf.put_u16(65535); // window
        buf.put_u16(0); // checksum
        buf.put_u16(0); // urgent pointer
        buf
    }

    fn tcp_frame() -> RawFrame {
        let mut buf = ethernet_header(0x0800);
        buf.extend_from_slice(&ipv4_header(ip::PROTO_TCP, [10, 0, 0, 1], [10, 0, 0, 2]));
        buf.extend_from_slice(&tcp_header(443, 51000, 0b0001_0010));
        RawFrame::with_timestamp(
            UNIX_EPOCH + Duration::from_micros(5_000_000),
            buf.to_vec(),
            buf.len(),
        )
    }

    #[test]
    fn test_parse_tcp_frame() {
        let frame = tcp_frame();
        let record = parse(&frame).unwrap();

        assert_eq!(record.source, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(record.destination, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)));
        assert_eq!(record.protocol, Protocol::Tcp);
        assert_eq!(record.length, frame.len);
        match record.detail {
            ProtocolDetail::Tcp {
                source_port,
                dest_port,
                flags,
            } => {
                assert_eq!(source_port, 443);
                assert_eq!(dest_port, 51000);
                assert!(flags.syn && flags.ack);
            }
            other => panic!("expected TCP detail, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_udp_frame() {
        let mut buf = ethernet_header(0x0800);
        buf.extend_from_slice(&ipv4_header(ip::PROTO_UDP, [10, 0, 0, 3], [10, 0, 0, 4]));
        buf.put_u16(40000);
        buf.put_u16(53);
        buf.put_u16(12); // length
        buf.put_u16(0); // checksum
        let frame = RawFrame::new(buf.to_vec());

        let record = parse(&frame).unwrap();
        assert_eq!(record.protocol, Protocol::Udp);
        assert_eq!(
            record.detail,
            ProtocolDetail::Udp {
                source_port: 40000,
                dest_port: 53
            }
        );
    }

    #[test]
    fn test_parse_icmp_frame() {
        let mut buf = ethernet_header(0x0800);
        buf.extend_from_slice(&ipv4_header(ip::PROTO_ICMP, [10, 0, 0, 5], [10, 0, 0, 6]));
        buf.put_slice(&[8, 0, 0, 0]); // echo request header start
        let frame = RawFrame::new(buf.to_vec());

        let record = parse(&frame).unwrap();
        assert_eq!(record.protocol, Protocol::Icmp);
        assert_eq!(record.detail, ProtocolDetail::None);
    }

    #[test]
    fn test_parse_unknown_ip_protocol() {
        let mut buf = ethernet_header(0x0800);
        buf.extend_from_slice(&ipv4_header(89, [10, 0, 0, 7], [10, 0, 0, 8])); // OSPF
        let frame = RawFrame::new(buf.to_vec());

        let record = parse(&frame).unwrap();
        assert_eq!(record.protocol, Protocol::Other);
        assert_eq!(record.detail, ProtocolDetail::None);
    }

    #[test]
    fn test_parse_arp_is_no_network_layer() {
        let buf = ethernet_header(0x0806);
        let frame = RawFrame::new(buf.to_vec());
        assert_eq!(parse(&frame), Err(ParseError::NoNetworkLayer));
    }

    #[test]
    fn test_parse_short_frame_is_no_network_layer() {
        let frame = RawFrame::new(vec![0u8; 8]);
        assert_eq!(parse(&frame), Err(ParseError::NoNetworkLayer));
    }

    #[test]
    fn test_parse_truncated_ip_header() {
        let mut buf = ethernet_header(0x0800);
        buf.put_slice(&[0x45, 0, 0, 0]); // 4 bytes of a 20-byte header
        let frame = RawFrame::new(buf.to_vec());
        assert_eq!(parse(&frame), Err(ParseError::TruncatedNetworkHeader));
    }

    #[test]
    fn test_truncated_tcp_degrades_to_other() {
        let mut buf = ethernet_header(0x0800);
        buf.extend_from_slice(&ipv4_header(ip::PROTO_TCP, [10, 0, 0, 1], [10, 0, 0, 2]));
        buf.put_slice(&[0x01, 0xBB]); // 2 bytes of a 20-byte header
        let frame = RawFrame::new(buf.to_vec());

        let record = parse(&frame).unwrap();
        assert_eq!(record.protocol, Protocol::Other);
        assert_eq!(record.detail, ProtocolDetail::None);
    }

    #[test]
    fn test_parse_vlan_tagged_tcp() {
        let mut buf = ethernet_header(0x8100);
        buf.put_u16(0x0064); // TCI, VLAN 100
        buf.put_u16(0x0800); // inner EtherType
        buf.extend_from_slice(&ipv4_header(ip::PROTO_TCP, [10, 0, 0, 1], [10, 0, 0, 2]));
        buf.extend_from_slice(&tcp_header(22, 50000, 0b0001_1000));
        let frame = RawFrame::new(buf.to_vec());

        let record = parse(&frame).unwrap();
        assert_eq!(record.protocol, Protocol::Tcp);
    }

    #[test]
    fn test_parse_ipv6_tcp() {
        let mut buf = ethernet_header(0x86DD);
        buf.put_u32(0x6000_0000); // version + traffic class + flow label
        buf.put_u16(20); // payload length
        buf.put_u8(ip::PROTO_TCP);
        buf.put_u8(64); // hop limit
        buf.put_slice(&[
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
        ]);
        buf.put_slice(&[
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2,
        ]);
        buf.extend_from_slice(&tcp_header(443, 60000, 0b0000_0010));
        let frame = RawFrame::new(buf.to_vec());

        let record = parse(&frame).unwrap();
        assert_eq!(record.protocol, Protocol::Tcp);
        assert!(record.source.is_ipv6());
        match record.detail {
            ProtocolDetail::Tcp { flags, .. } => assert!(flags.syn && !flags.ack),
            other => panic!("expected TCP detail, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_icmpv6() {
        let mut buf = ethernet_header(0x86DD);
        buf.put_u32(0x6000_0000);
        buf.put_u16(8);
        buf.put_u8(ip::PROTO_ICMPV6);
        buf.put_u8(255);
        buf.put_slice(&[0xFE, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        buf.put_slice(&[0xFF, 0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        let frame = RawFrame::new(buf.to_vec());

        let record = parse(&frame).unwrap();
        assert_eq!(record.protocol, Protocol::Icmp);
    }

    #[test]
    fn test_parser_determinism() {
        let frame = tcp_frame();
        let first = parse(&frame).unwrap();
        let second = parse(&frame).unwrap();
        assert_eq!(first, second);

        let bad = RawFrame::new(ethernet_header(0x0806).to_vec());
        assert_eq!(parse(&bad), parse(&bad));
    }

    #[test]
    fn test_tcp_frame_preserves_timestamp() {
        let frame = tcp_frame();
        let record = parse(&frame).unwrap();
        assert_eq!(record.epoch_micros(), 5_000_000);
    }
}
