//! Ingestion engine
//!
//! The `Monitor` owns the rolling window and drives a frame source on
//! a dedicated worker thread: read, parse, append. Consumers query
//! snapshots and aggregates concurrently with ongoing ingestion.

use crate::aggregate::{self, RateBucket};
use crate::source::FrameSource;
use crate::store::PacketStore;
use netpulse_core::{Error, MonitorConfig, PacketRecord, Protocol, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

/// State of the ingestion loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Ingestion is not running
    Stopped,
    /// Ingestion worker is active
    Running,
}

/// Packets and bytes accepted into the window since the last start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestTotals {
    pub packets: u64,
    pub bytes: u64,
}

#[derive(Debug, Default)]
struct Counters {
    dropped: AtomicU64,
    packets: AtomicU64,
    bytes: AtomicU64,
}

/// Live traffic monitor: bounded window plus ingestion lifecycle.
///
/// `start` spawns a worker that blocks on the source (bounded by the
/// source's read timeout), so no consumer-facing call ever waits on
/// network I/O. `stop` is cooperative and idempotent: the worker
/// finishes its in-flight frame, then exits.
#[derive(Debug)]
pub struct Monitor {
    config: MonitorConfig,
    store: Arc<PacketStore>,
    state: Arc<RwLock<MonitorState>>,
    counters: Arc<Counters>,
    fatal: Arc<Mutex<Option<Error>>>,
    worker: Option<JoinHandle<()>>,
}

impl Monitor {
    /// Create a stopped monitor with the given configuration
    pub fn new(config: MonitorConfig) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(PacketStore::new(config.capacity)?);

        Ok(Self {
            config,
            store,
            state: Arc::new(RwLock::new(MonitorState::Stopped)),
            counters: Arc::new(Counters::default()),
            fatal: Arc::new(Mutex::new(None)),
            worker: None,
        })
    }

    /// Start ingesting from the given source.
    ///
    /// Resets the drop counter and ingest totals and clears any prior
    /// fatal error. Errors if already running.
    pub fn start(&mut self, mut source: Box<dyn FrameSource>) -> Result<()> {
        if *self.state.read() == MonitorState::Running {
            return Err(Error::capture("Monitor already running"));
        }

        // Reap a worker left over from a fatal-error exit
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        self.counters.dropped.store(0, Ordering::Relaxed);
        self.counters.packets.store(0, Ordering::Relaxed);
        self.counters.bytes.store(0, Ordering::Relaxed);
        *self.fatal.lock() = None;
        *self.state.write() = MonitorState::Running;

        info!("Starting ingestion");

        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let counters = Arc::clone(&self.counters);
        let fatal = Arc::clone(&self.fatal);

        let handle = thread::spawn(move || {
            loop {
                if *state.read() == MonitorState::Stopped {
                    debug!("Stop requested");
                    break;
                }

                match source.next_frame() {
                    Ok(Some(frame)) => match netpulse_packet::parse(&frame) {
                        Ok(record) => {
                            counters.packets.fetch_add(1, Ordering::Relaxed);
                            counters
                                .bytes
                                .fetch_add(record.length as u64, Ordering::Relaxed);
                            store.append(record);
                        }
                        Err(err) => {
                            counters.dropped.fetch_add(1, Ordering::Relaxed);
                            debug!("Dropped frame: {}", err);
                        }
                    },
                    // Read timeout with no traffic; loop to re-check state
                    Ok(None) => continue,
                    Err(err) => {
                        error!("Fatal capture error: {}", err);
                        *fatal.lock() = Some(err);
                        break;
                    }
                }
            }

            *state.write() = MonitorState::Stopped;
            info!("Ingestion worker finished");
        });

        self.worker = Some(handle);
        Ok(())
    }

    /// Request graceful termination and wait for the worker to exit.
    ///
    /// Idempotent: stopping a stopped monitor is a no-op. Returns
    /// within a bounded time because the source read times out.
    pub fn stop(&mut self) -> Result<()> {
        {
            let mut state = self.state.write();
            if *state == MonitorState::Stopped && self.worker.is_none() {
                return Ok(());
            }
            *state = MonitorState::Stopped;
        }

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("Ingestion worker panicked");
            }
        }

        info!("Ingestion stopped");
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> MonitorState {
        *self.state.read()
    }

    /// Point-in-time copy of the window contents, in insertion order
    pub fn snapshot(&self) -> Vec<PacketRecord> {
        self.store.snapshot()
    }

    /// Current window size
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Frames dropped to parse failures since the last start
    pub fn dropped_count(&self) -> u64 {
        self.counters.dropped.load(Ordering::Relaxed)
    }

    /// Packets and bytes accepted since the last start
    pub fn ingest_totals(&self) -> IngestTotals {
        IngestTotals {
            packets: self.counters.packets.load(Ordering::Relaxed),
            bytes: self.counters.bytes.load(Ordering::Relaxed),
        }
    }

    /// Take the fatal capture error, if one stopped ingestion.
    ///
    /// One-shot: the error is surfaced exactly once; subsequent calls
    /// return `None` until another fatal error occurs.
    pub fn take_error(&self) -> Option<Error> {
        self.fatal.lock().take()
    }

    /// The active configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Protocol distribution of the current window
    pub fn protocol_distribution(&self) -> BTreeMap<Protocol, u64> {
        aggregate::protocol_distribution(&self.snapshot())
    }

    /// Rate timeline of the current window at the configured bucket width
    pub fn rate_timeline(&self) -> Vec<RateBucket> {
        aggregate::rate_timeline(&self.snapshot(), self.config.bucket_width)
    }

    /// Top source addresses of the current window at the configured N
    pub fn top_sources(&self) -> Vec<(IpAddr, u64)> {
        aggregate::top_sources(&self.snapshot(), self.config.top_n)
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
