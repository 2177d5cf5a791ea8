//! Aggregate views over window snapshots
//!
//! Pure functions: each takes a snapshot slice and returns a derived
//! view, holding no state of its own. New views are added by adding a
//! function here. All tolerate an empty snapshot.

use netpulse_core::{PacketRecord, Protocol};
use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;
use std::time::Duration;

/// One fixed-width slot of the rate timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBucket {
    /// Bucket start, microseconds since the Unix epoch, aligned to
    /// the bucket width
    pub start_micros: u64,
    /// Packets whose capture time falls in the bucket
    pub count: u64,
}

/// Total packet and byte volume of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrafficTotals {
    pub packets: u64,
    pub bytes: u64,
}

/// Count packets per protocol variant.
///
/// The sum of the counts equals the snapshot length.
pub fn protocol_distribution(snapshot: &[PacketRecord]) -> BTreeMap<Protocol, u64> {
    let mut counts = BTreeMap::new();
    for record in snapshot {
        *counts.entry(record.protocol).or_insert(0) += 1;
    }
    counts
}

/// Partition the snapshot into fixed-width time buckets.
///
/// Buckets cover the observed span contiguously and in ascending
/// order; spans with no packets still appear with count 0. Empty
/// snapshot yields an empty timeline.
pub fn rate_timeline(snapshot: &[PacketRecord], bucket_width: Duration) -> Vec<RateBucket> {
    let width = bucket_width.as_micros() as u64;
    if snapshot.is_empty() || width == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<u64, u64> = HashMap::new();
    let mut first = u64::MAX;
    let mut last = 0u64;
    for record in snapshot {
        let bucket = record.epoch_micros() / width;
        *counts.entry(bucket).or_insert(0) += 1;
        first = first.min(bucket);
        last = last.max(bucket);
    }

    (first..=last)
        .map(|bucket| RateBucket {
            start_micros: bucket * width,
            count: counts.get(&bucket).copied().unwrap_or(0),
        })
        .collect()
}

/// The `n` most frequent source addresses, counts descending.
///
/// Ties are broken by the address's first appearance in the snapshot,
/// so the result is deterministic for a given snapshot.
pub fn top_sources(snapshot: &[PacketRecord], n: usize) -> Vec<(IpAddr, u64)> {
    let mut counts: HashMap<IpAddr, (u64, usize)> = HashMap::new();
    for (index, record) in snapshot.iter().enumerate() {
        counts
            .entry(record.source)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, index));
    }

    let mut sources: Vec<(IpAddr, u64, usize)> = counts
        .into_iter()
        .map(|(addr, (count, first_seen))| (addr, count, first_seen))
        .collect();
    sources.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    sources.truncate(n);

    sources
        .into_iter()
        .map(|(addr, count, _)| (addr, count))
        .collect()
}

/// Total packet and byte volume of the snapshot
pub fn traffic_totals(snapshot: &[PacketRecord]) -> TrafficTotals {
    TrafficTotals {
        packets: snapshot.len() as u64,
        bytes: snapshot.iter().map(|r| r.length as u64).sum(),
    }
}
