//! Frame parsing for NetPulse
//!
//! Pure, deterministic extraction of protocol metadata from raw
//! link-layer frames. No I/O and no shared state: identical input
//! always yields an identical `PacketRecord` or an identical
//! `ParseError`.
//!
//! ## Example
//!
//! ```no_run
//! use netpulse_core::RawFrame;
//!
//! let frame = RawFrame::new(vec![/* captured bytes */]);
//! match netpulse_packet::parse(&frame) {
//!     Ok(record) => println!("{} -> {}", record.source, record.destination),
//!     Err(err) => println!("dropped: {}", err),
//! }
//! ```

pub mod ethernet;
pub mod ip;
pub mod parser;
pub mod transport;

pub use ethernet::EtherType;
pub use ip::NetworkHeader;
pub use parser::parse;
