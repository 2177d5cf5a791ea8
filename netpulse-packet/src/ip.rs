//! IPv4 and IPv6 header field extraction
//!
//! Only the fields the monitor needs: addresses, the transport
//! protocol number, and where the transport header starts. Options
//! and extension headers are not decoded.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Minimum IPv4 header size (IHL = 5)
pub const IPV4_MIN_HEADER: usize = 20;

/// Fixed IPv6 header size
pub const IPV6_HEADER: usize = 40;

/// ICMP protocol number
pub const PROTO_ICMP: u8 = 1;

/// TCP protocol number
pub const PROTO_TCP: u8 = 6;

/// UDP protocol number
pub const PROTO_UDP: u8 = 17;

/// ICMPv6 next-header number
pub const PROTO_ICMPV6: u8 = 58;

/// Extracted network-layer fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkHeader {
    /// Source address
    pub source: IpAddr,
    /// Destination address
    pub destination: IpAddr,
    /// Transport protocol number (IPv4 protocol / IPv6 next-header)
    pub protocol: u8,
    /// Offset of the transport header relative to the network header
    pub payload_offset: usize,
}

/// Parse an IPv4 header.
///
/// Returns `None` when the buffer is shorter than the header length
/// the IHL field claims, or the version nibble is not 4.
pub fn parse_ipv4(data: &[u8]) -> Option<NetworkHeader> {
    if data.len() < IPV4_MIN_HEADER {
        return None;
    }

    let version = data[0] >> 4;
    if version != 4 {
        return None;
    }

    let header_len = ((data[0] & 0x0F) as usize) * 4;
    if header_len < IPV4_MIN_HEADER || data.len() < header_len {
        return None;
    }

    let protocol = data[9];
    let source = Ipv4Addr::new(data[12], data[13], data[14], data[15]);
    let destination = Ipv4Addr::new(data[16], data[17], data[18], data[19]);

    Some(NetworkHeader {
        source: IpAddr::V4(source),
        destination: IpAddr::V4(destination),
        protocol,
        payload_offset: header_len,
    })
}

/// Parse an IPv6 header.
///
/// Extension headers are not walked; `protocol` is the first
/// next-header value, so chained extensions classify as OTHER
/// downstream.
pub fn parse_ipv6(data: &[u8]) -> Option<NetworkHeader> {
    if data.len() < IPV6_HEADER {
        return None;
    }

    let version = data[0] >> 4;
    if version != 6 {
        return None;
    }

    let protocol = data[6];

    let mut src = [0u8; 16];
    src.copy_from_slice(&data[8..24]);
    let mut dst = [0u8; 16];
    dst.copy_from_slice(&data[24..40]);

    Some(NetworkHeader {
        source: IpAddr::V6(Ipv6Addr::from(src)),
        destination: IpAddr::V6(Ipv6Addr::from(dst)),
        protocol,
        payload_offset: IPV6_HEADER,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ipv4_header(protocol: u8) -> Vec<u8> {
        let mut header = vec![0u8; IPV4_MIN_HEADER];
        header[0] = 0x45; // version 4, IHL 5
        header[9] = protocol;
        header[12..16].copy_from_slice(&[192, 168, 1, 1]);
        header[16..20].copy_from_slice(&[192, 168, 1, 2]);
        header
    }

    #[test]
    fn test_parse_ipv4() {
        let header = parse_ipv4(&ipv4_header(PROTO_TCP)).unwrap();
        assert_eq!(header.source, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(
            header.destination,
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2))
        );
        assert_eq!(header.protocol, PROTO_TCP);
        assert_eq!(header.payload_offset, IPV4_MIN_HEADER);
    }

    #[test]
    fn test_parse_ipv4_with_options() {
        let mut data = ipv4_header(PROTO_UDP);
        data[0] = 0x46; // IHL 6 = 24-byte header
        data.extend_from_slice(&[0u8; 4]);
        let header = parse_ipv4(&data).unwrap();
        assert_eq!(header.payload_offset, 24);
    }

    #[test]
    fn test_parse_ipv4_truncated() {
        assert!(parse_ipv4(&[0x45; 19]).is_none());

        // IHL claims options the buffer does not carry
        let mut data = ipv4_header(PROTO_TCP);
        data[0] = 0x4F;
        assert!(parse_ipv4(&data).is_none());
    }

    #[test]
    fn test_parse_ipv4_bad_version() {
        let mut data = ipv4_header(PROTO_TCP);
        data[0] = 0x65;
        assert!(parse_ipv4(&data).is_none());
    }

    #[test]
    fn test_parse_ipv6() {
        let mut data = vec![0u8; IPV6_HEADER];
        data[0] = 0x60;
        data[6] = PROTO_TCP;
        data[8..24].copy_from_slice(&[
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
        ]);
        data[24..40].copy_from_slice(&[
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2,
        ]);

        let header = parse_ipv6(&data).unwrap();
        assert_eq!(header.protocol, PROTO_TCP);
        assert_eq!(header.payload_offset, IPV6_HEADER);
        match header.source {
            IpAddr::V6(addr) => assert_eq!(addr.segments()[0], 0x2001),
            _ => panic!("expected IPv6 source"),
        }
    }

    #[test]
    fn test_parse_ipv6_truncated() {
        assert!(parse_ipv6(&[0x60; 39]).is_none());
    }
}
