//! TCP and UDP header field extraction

use netpulse_core::TcpFlags;

/// Minimum TCP header size (without options)
pub const TCP_MIN_HEADER: usize = 20;

/// Fixed UDP header size
pub const UDP_HEADER: usize = 8;

/// Extracted TCP header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpInfo {
    pub source_port: u16,
    pub dest_port: u16,
    pub flags: TcpFlags,
}

/// Extracted UDP header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpInfo {
    pub source_port: u16,
    pub dest_port: u16,
}

/// Parse a TCP header. Returns `None` if truncated below the fixed
/// minimum; callers degrade such packets to OTHER.
pub fn parse_tcp(data: &[u8]) -> Option<TcpInfo> {
    if data.len() < TCP_MIN_HEADER {
        return None;
    }

    Some(TcpInfo {
        source_port: u16::from_be_bytes([data[0], data[1]]),
        dest_port: u16::from_be_bytes([data[2], data[3]]),
        flags: TcpFlags::from_u8(data[13]),
    })
}

/// Parse a UDP header. Returns `None` if truncated.
pub fn parse_udp(data: &[u8]) -> Option<UdpInfo> {
    if data.len() < UDP_HEADER {
        return None;
    }

    Some(UdpInfo {
        source_port: u16::from_be_bytes([data[0], data[1]]),
        dest_port: u16::from_be_bytes([data[2], data[3]]),
    })
}
