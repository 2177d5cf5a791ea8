//! Captured frame and parsed packet record types

use std::fmt;
use std::net::IpAddr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A raw frame as delivered by a capture source
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// When the frame was captured
    pub timestamp: SystemTime,
    /// Link-layer frame data (possibly truncated to the snapshot length)
    pub data: Vec<u8>,
    /// Original wire length (may exceed data.len() if truncated)
    pub len: usize,
}

impl RawFrame {
    /// Create a new frame captured now
    pub fn new(data: Vec<u8>) -> Self {
        let len = data.len();
        Self {
            timestamp: SystemTime::now(),
            data,
            len,
        }
    }

    /// Create a frame with an explicit capture timestamp
    pub fn with_timestamp(timestamp: SystemTime, data: Vec<u8>, len: usize) -> Self {
        Self {
            timestamp,
            data,
            len,
        }
    }
}

/// Network protocol classification of a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Protocol {
    /// Transmission Control Protocol
    Tcp,
    /// User Datagram Protocol
    Udp,
    /// ICMP (v4 or v6)
    Icmp,
    /// Any other IP payload
    Other,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
            Protocol::Icmp => write!(f, "ICMP"),
            Protocol::Other => write!(f, "OTHER"),
        }
    }
}

/// TCP header flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TcpFlags {
    /// FIN - No more data from sender
    pub fin: bool,
    /// SYN - Synchronize sequence numbers
    pub syn: bool,
    /// RST - Reset the connection
    pub rst: bool,
    /// PSH - Push function
    pub psh: bool,
    /// ACK - Acknowledgment field is significant
    pub ack: bool,
    /// URG - Urgent pointer field is significant
    pub urg: bool,
    /// ECE - ECN-Echo
    pub ece: bool,
    /// CWR - Congestion Window Reduced
    pub cwr: bool,
}

impl TcpFlags {
    /// No flags set
    pub const NONE: TcpFlags = TcpFlags {
        fin: false,
        syn: false,
        rst: false,
        psh: false,
        ack: false,
        urg: false,
        ece: false,
        cwr: false,
    };

    /// Convert flags to the header flag byte
    pub fn to_u8(self) -> u8 {
        let mut flags = 0u8;
        if self.fin {
            flags |= 0b0000_0001;
        }
        if self.syn {
            flags |= 0b0000_0010;
        }
        if self.rst {
            flags |= 0b0000_0100;
        }
        if self.psh {
            flags |= 0b0000_1000;
        }
        if self.ack {
            flags |= 0b0001_0000;
        }
        if self.urg {
            flags |= 0b0010_0000;
        }
        if self.ece {
            flags |= 0b0100_0000;
        }
        if self.cwr {
            flags |= 0b1000_0000;
        }
        flags
    }

    /// Parse flags from the header flag byte
    pub fn from_u8(value: u8) -> Self {
        TcpFlags {
            fin: (value & 0b0000_0001) != 0,
            syn: (value & 0b0000_0010) != 0,
            rst: (value & 0b0000_0100) != 0,
            psh: (value & 0b0000_1000) != 0,
            ack: (value & 0b0001_0000) != 0,
            urg: (value & 0b0010_0000) != 0,
            ece: (value & 0b0100_0000) != 0,
            cwr: (value & 0b1000_0000) != 0,
        }
    }
}

/// Transport-layer detail, varying by protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolDetail {
    /// TCP ports and flags
    Tcp {
        source_port: u16,
        dest_port: u16,
        flags: TcpFlags,
    },
    /// UDP ports
    Udp { source_port: u16, dest_port: u16 },
    /// ICMP and unclassified payloads carry no transport detail
    None,
}

/// One observed packet, immutable once constructed.
///
/// The store only appends and evicts whole records; nothing mutates a
/// record after the parser builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketRecord {
    /// Capture time
    pub timestamp: SystemTime,
    /// Network-layer source address
    pub source: IpAddr,
    /// Network-layer destination address
    pub destination: IpAddr,
    /// Protocol classification
    pub protocol: Protocol,
    /// Variant-specific transport fields
    pub detail: ProtocolDetail,
    /// Original frame byte length
    pub length: usize,
}

impl PacketRecord {
    /// Capture time as microseconds since the Unix epoch.
    ///
    /// Timestamps before the epoch clamp to zero.
    pub fn epoch_micros(&self) -> u64 {
        self.timestamp
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}
