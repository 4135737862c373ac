//! Per-tick health count history.

use cg_core::{HealthCounts, Tick};

/// Health counts after one completed tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub tick:   Tick,
    pub counts: HealthCounts,
}

/// One entry per completed tick since the last (re)start, in tick order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HealthHistory {
    entries: Vec<HistoryEntry>,
}

impl HealthHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, counts: HealthCounts) {
        self.entries.push(HistoryEntry { tick, counts });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entry with the most sick agents; the earliest one on a tie.
    pub fn peak_sick(&self) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .reduce(|best, e| if e.counts.sick > best.counts.sick { e } else { best })
    }

    /// Sick series, one value per tick.  Handy for plotting.
    pub fn sick_series(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|e| e.counts.sick)
    }
}
