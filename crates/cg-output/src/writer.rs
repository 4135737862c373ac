//! The `OutputWriter` trait implemented by output backends.

use crate::{AgentSnapshotRow, HealthCountRow, OutputResult};

/// Sink for per-tick health counts and periodic agent snapshots.
///
/// Errors surface to the observer, which keeps the first one for
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write one row of health counts.
    fn write_health_counts(&mut self, row: &HealthCountRow) -> OutputResult<()>;

    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
