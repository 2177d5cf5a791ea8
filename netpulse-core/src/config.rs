//! Monitor configuration

use crate::error::{Error, Result};
use std::time::Duration;

/// Default rolling window capacity (packets)
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Default number of addresses reported by top-sources queries
pub const DEFAULT_TOP_N: usize = 10;

/// Default rate timeline bucket width
pub const DEFAULT_BUCKET_WIDTH: Duration = Duration::from_secs(1);

/// Configuration for the traffic monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Maximum packets retained in the rolling window
    pub capacity: usize,
    /// Number of addresses returned by top-sources queries
    pub top_n: usize,
    /// Bucket width for the rate timeline
    pub bucket_width: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            top_n: DEFAULT_TOP_N,
            bucket_width: DEFAULT_BUCKET_WIDTH,
        }
    }
}

impl MonitorConfig {
    /// Set the rolling window capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the top-sources count
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the rate timeline bucket width
    pub fn with_bucket_width(mut self, bucket_width: Duration) -> Self {
        self.bucket_width = bucket_width;
        self
    }

    /// Validate the configuration, failing fast on zero values
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::invalid_config("capacity", "must be at least 1"));
        }
        if self.top_n == 0 {
            return Err(Error::invalid_config("top_n", "must be at least 1"));
        }
        if self.bucket_width.is_zero() {
            return Err(Error::invalid_config("bucket_width", "must be non-zero"));
        }
        Ok(())
    }
}
