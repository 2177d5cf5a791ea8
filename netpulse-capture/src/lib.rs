//! Capture and ingestion library for NetPulse
//!
//! This crate provides the concurrent core of the traffic monitor:
//! a blocking capture source, a bounded thread-safe rolling window of
//! parsed packets, an ingestion engine that drives the two, and pure
//! aggregate functions over window snapshots.
//!
//! ## Example
//!
//! ```no_run
//! use netpulse_capture::{aggregate, Monitor, PcapSource};
//! use netpulse_core::MonitorConfig;
//!
//! # fn main() -> netpulse_core::Result<()> {
//! let mut monitor = Monitor::new(MonitorConfig::default())?;
//! let source = PcapSource::open("eth0")?;
//! monitor.start(Box::new(source))?;
//!
//! // Consumer side, on its own schedule:
//! let snapshot = monitor.snapshot();
//! for (protocol, count) in aggregate::protocol_distribution(&snapshot) {
//!     println!("{}: {}", protocol, count);
//! }
//!
//! monitor.stop()?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod interface;
pub mod monitor;
pub mod source;
pub mod store;

// Re-export main types
pub use interface::{default_interface, get_interface, list_interfaces, InterfaceInfo};
pub use monitor::{IngestTotals, Monitor, MonitorState};
pub use source::{FrameSource, PcapSource, SourceConfig};
pub use store::PacketStore;
