//! Match counters for diagnostics.
//!
//! Counters live in a [`MatchStats`] value owned by the host, never in
//! globals. A periodic reporter calls [`MatchStats::take`] to read the counts
//! accumulated since its previous call.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of [`MatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Events run through a rule set.
    pub evaluated: u64,
    /// Events that matched at least one rule.
    pub matched: u64,
}

impl StatsSnapshot {
    pub fn unmatched(&self) -> u64 {
        self.evaluated.saturating_sub(self.matched)
    }
}

/// Thread-safe event counters.
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::MatchStats;
///
/// let stats = MatchStats::new();
/// stats.record(true);
/// stats.record(false);
///
/// let taken = stats.take();
/// assert_eq!((taken.evaluated, taken.matched), (2, 1));
/// assert_eq!(stats.snapshot().evaluated, 0);
/// ```
#[derive(Debug, Default)]
pub struct MatchStats {
    evaluated: AtomicU64,
    matched: AtomicU64,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, matched: bool) {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
        if matched {
            self.matched.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            evaluated: self.evaluated.load(Ordering::Relaxed),
            matched: self.matched.load(Ordering::Relaxed),
        }
    }

    /// Read and reset all counters.
    ///
    /// Each counter is swapped individually, so a concurrent `record` may land
    /// in either this window or the next one, but is never lost.
    pub fn take(&self) -> StatsSnapshot {
        StatsSnapshot {
            evaluated: self.evaluated.swap(0, Ordering::Relaxed),
            matched: self.matched.swap(0, Ordering::Relaxed),
        }
    }
}
