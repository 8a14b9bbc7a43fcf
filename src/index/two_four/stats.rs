//! Tree operation and rebalancing statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by the tree.
///
/// All fields are atomic so that read-only operations (`contains`) can count
/// themselves through `&self`.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
///
/// # Example
/// ```
/// use twofourdb::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.splits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().splits, 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Number of `contains` calls.
    pub searches: AtomicU64,

    /// Number of keys successfully inserted.
    pub inserts: AtomicU64,

    /// Number of keys successfully deleted.
    pub deletes: AtomicU64,

    /// Number of 4-nodes split on the way down during insertion.
    pub splits: AtomicU64,

    /// Number of keys borrowed from a sibling during deletion.
    pub rotations: AtomicU64,

    /// Number of sibling merges during deletion.
    pub merges: AtomicU64,

    /// Number of times the tree grew a level (root split).
    pub root_growths: AtomicU64,

    /// Number of times the tree lost a level (root emptied by a merge).
    pub root_shrinks: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            searches: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
            merges: AtomicU64::new(0),
            root_growths: AtomicU64::new(0),
            root_shrinks: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            searches: self.searches.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            root_growths: self.root_growths.load(Ordering::Relaxed),
            root_shrinks: self.root_shrinks.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.searches.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.deletes.store(0, Ordering::Relaxed);
        self.splits.store(0, Ordering::Relaxed);
        self.rotations.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
        self.root_growths.store(0, Ordering::Relaxed);
        self.root_shrinks.store(0, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of tree statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub searches: u64,
    pub inserts: u64,
    pub deletes: u64,
    pub splits: u64,
    pub rotations: u64,
    pub merges: u64,
    pub root_growths: u64,
    pub root_shrinks: u64,
}

impl StatsSnapshot {
    /// Total restructuring steps (splits, rotations and merges).
    pub fn rebalance_count(&self) -> u64 {
        self.splits + self.rotations + self.merges
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, deletes: {}, searches: {}, splits: {}, rotations: {}, merges: {} }}",
            self.inserts, self.deletes, self.searches, self.splits, self.rotations, self.merges
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_bump_and_reset() {
        let stats = TreeStats::new();
        TreeStats::bump(&stats.splits);
        TreeStats::bump(&stats.merges);
        TreeStats::bump(&stats.merges);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.splits, 1);
        assert_eq!(snapshot.merges, 2);
        assert_eq!(snapshot.rebalance_count(), 3);

        stats.reset();
        assert_eq!(stats.snapshot().rebalance_count(), 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats::new();
        stats.inserts.fetch_add(80, Ordering::Relaxed);
        stats.rotations.fetch_add(5, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());
        assert!(display.contains("inserts: 80"));
        assert!(display.contains("rotations: 5"));
    }
}
