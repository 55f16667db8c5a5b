//! Dedup registry and counters for discovered misspeculation windows.

use std::collections::HashSet;

/// Snapshot of the four monotone window counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// Windows opened (one per non-committed event seen from the initial state).
    pub total_flushed: u64,
    /// Distinct window start PCs seen.
    pub unique_flushed: u64,
    /// Leaks observed (one per accepting window, including repeats).
    pub total_vulnerable: u64,
    /// Distinct vulnerable window start PCs.
    pub unique_vulnerable: u64,
}

/// Records every misspeculation window by its start PC and dedupes them for
/// reporting.
///
/// Both PC sets only ever grow. On a long-running trace with many distinct
/// window PCs this is unbounded; fine for bounded simulation runs, a caveat
/// for anything longer.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    flushed: HashSet<u64>,
    vulnerable: HashSet<u64>,
    stats: WindowStats,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a window opening at `pc`. Returns whether this PC is new.
    pub fn record_flushed(&mut self, pc: u64) -> bool {
        self.stats.total_flushed += 1;
        let first = self.flushed.insert(pc);
        if first {
            self.stats.unique_flushed += 1;
        }
        first
    }

    /// Record a leak in the window that opened at `pc`. Returns whether this
    /// PC is new; the diagnostic is emitted only on first sight, not per
    /// occurrence.
    pub fn record_vulnerable(&mut self, pc: u64) -> bool {
        self.stats.total_vulnerable += 1;
        let first = self.vulnerable.insert(pc);
        if first {
            self.stats.unique_vulnerable += 1;
            tracing::info!("potential vulnerable window found at {pc:#018x}");
        }
        first
    }

    pub fn stats(&self) -> WindowStats {
        self.stats
    }
}
