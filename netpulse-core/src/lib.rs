//! NetPulse Core Library
//!
//! This crate provides the fundamental types, error handling, and
//! configuration for the NetPulse live traffic monitor.

pub mod config;
pub mod error;
pub mod record;

// Re-export commonly used types
pub use config::MonitorConfig;
pub use error::{Error, ParseError, Result};
pub use record::{PacketRecord, Protocol, ProtocolDetail, RawFrame, TcpFlags};
