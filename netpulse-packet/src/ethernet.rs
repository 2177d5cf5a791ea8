//! Ethernet II frame dispatch
//!
//! Locates the network-layer payload inside a captured Ethernet II
//! frame, skipping 802.1Q/802.1ad VLAN tags.

/// Ethernet II header size (dst MAC + src MAC + EtherType)
pub const HEADER_SIZE: usize = 14;

/// Size of one 802.1Q/802.1ad tag (TPID + TCI)
pub const VLAN_TAG_SIZE: usize = 4;

/// Maximum nested VLAN tags skipped (Q-in-Q)
const MAX_VLAN_TAGS: usize = 2;

/// EtherType values relevant to network-layer dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    /// IPv4 (0x0800)
    Ipv4,
    /// IPv6 (0x86DD)
    Ipv6,
    /// VLAN-tagged frame (0x8100)
    Vlan,
    /// Q-in-Q/802.1ad (0x88A8)
    QinQ,
    /// Anything else
    Other(u16),
}

impl EtherType {
    /// Create EtherType from the wire value
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0800 => EtherType::Ipv4,
            0x86DD => EtherType::Ipv6,
            0x8100 => EtherType::Vlan,
            0x88A8 => EtherType::QinQ,
            val => EtherType::Other(val),
        }
    }
}

/// Resolve the network-layer EtherType and payload offset of a frame.
///
/// Skips up to two VLAN tags. Returns `None` if the frame is too short
/// to hold the Ethernet header (or a tag it claims to carry).
pub fn network_payload(frame: &[u8]) -> Option<(EtherType, usize)> {
    if frame.len() < HEADER_SIZE {
        return None;
    }

    let mut ether_type = u16::from_be_bytes([frame[12], frame[13]]);
    let mut offset = HEADER_SIZE;

    for _ in 0..MAX_VLAN_TAGS {
        if !matches!(
            EtherType::from_u16(ether_type),
            EtherType::Vlan | EtherType::QinQ
        ) {
            break;
        }
        if frame.len() < offset + VLAN_TAG_SIZE {
            return None;
        }
        ether_type = u16::from_be_bytes([frame[offset + 2], frame[offset + 3]]);
        offset += VLAN_TAG_SIZE;
    }

    Some((EtherType::from_u16(ether_type), offset))
}
