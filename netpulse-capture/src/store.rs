//! Bounded rolling window of packet records

use netpulse_core::{Error, PacketRecord, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Thread-safe FIFO window holding the most recent records.
///
/// All access is serialized by a single mutex scoped tightly around
/// the mutation or copy; the lock is never held across a capture call.
/// A `snapshot()` therefore reflects some exact prefix of completed
/// appends, never a partial record.
#[derive(Debug)]
pub struct PacketStore {
    records: Mutex<VecDeque<PacketRecord>>,
    capacity: usize,
}

impl PacketStore {
    /// Create an empty store with a fixed capacity
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_config("capacity", "must be at least 1"));
        }
        Ok(Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        })
    }

    /// Append a record, evicting the oldest if at capacity
    pub fn append(&self, record: PacketRecord) {
        let mut records = self.records.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Copy the current contents in insertion order
    pub fn snapshot(&self) -> Vec<PacketRecord> {
        let records = self.records.lock();
        records.iter().cloned().collect()
    }

    /// Current record count
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
