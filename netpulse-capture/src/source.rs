//! Frame sources
//!
//! A `FrameSource` yields raw frames to the ingestion loop. The pcap
//! implementation reads with a timeout so a pending read never blocks
//! longer than the timeout, which bounds shutdown latency on an idle
//! interface.

use crate::interface::get_interface;
use netpulse_core::{Error, RawFrame, Result};
use pcap::{Active, Capture, Device};
use std::time::SystemTime;
use tracing::{debug, info};

/// Default snapshot length (maximum bytes per packet)
const DEFAULT_SNAPLEN: i32 = 65535;

/// Default read timeout (milliseconds); also the bound on how long a
/// stop request can go unobserved by the ingestion loop
const DEFAULT_TIMEOUT_MS: i32 = 1000;

/// Configuration for a pcap frame source
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Maximum bytes to capture per packet
    pub snaplen: i32,
    /// Read timeout in milliseconds
    pub timeout_ms: i32,
    /// Enable promiscuous mode
    pub promiscuous: bool,
    /// Enable immediate mode (deliver packets immediately)
    pub immediate_mode: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snaplen: DEFAULT_SNAPLEN,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            promiscuous: true,
            immediate_mode: true,
        }
    }
}

/// Supplier of raw frames to the ingestion loop.
///
/// `Ok(Some(frame))` is a captured frame; `Ok(None)` means the read
/// timed out with no traffic (normal on an idle interface, and the
/// point at which the loop re-checks its stop flag); `Err` is fatal
/// for the capture session.
pub trait FrameSource: Send {
    /// Obtain the next frame, or time out
    fn next_frame(&mut self) -> Result<Option<RawFrame>>;
}

/// Live capture source backed by pcap
pub struct PcapSource {
    capture: Capture<Active>,
    interface: String,
}

impl PcapSource {
    /// Open a live capture on the named interface with defaults
    pub fn open(interface: &str) -> Result<Self> {
        Self::with_config(interface, SourceConfig::default())
    }

    /// Open a live capture with custom configuration
    pub fn with_config(interface: &str, config: SourceConfig) -> Result<Self> {
        let info = get_interface(interface)?;
        if !info.is_up {
            return Err(Error::Capture(format!(
                "Interface '{}' is not up",
                interface
            )));
        }

        debug!("Opening pcap capture on {}", interface);

        let device = Device::from(interface);
        let capture = Capture::from_device(device)
            .map_err(|e| Error::Capture(format!("Failed to create capture: {}", e)))?
            .promisc(config.promiscuous)
            .snaplen(config.snaplen)
            .timeout(config.timeout_ms)
            .immediate_mode(config.immediate_mode)
            .open()
            .map_err(|e| Error::Capture(format!("Failed to open capture: {}", e)))?;

        info!("Capture opened on {}", interface);

        Ok(Self {
            capture,
            interface: interface.to_string(),
        })
    }

    /// Name of the interface this source captures on
    pub fn interface(&self) -> &str {
        &self.interface
    }
}

impl FrameSource for PcapSource {
    fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        match self.capture.next_packet() {
            Ok(packet) => Ok(Some(RawFrame::with_timestamp(
                SystemTime::now(),
                packet.data.to_vec(),
                packet.header.len as usize,
            ))),
            // Timeout is normal; lets the caller re-check its stop flag
            Err(pcap::Error::TimeoutExpired) => Ok(None),
            Err(e) => Err(Error::Capture(format!(
                "Capture on '{}' failed: {}",
                self.interface, e
            ))),
        }
    }
}
