//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use cg_core::{HealthCounts, Tick};
use cg_graph::Graph;
use cg_sim::{SimObserver, TickReport};

use crate::row::{AgentSnapshotRow, HealthCountRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes health counts every tick and agent
/// snapshots at the simulation's snapshot interval.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After the run, check with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Runs that end without
    /// [`SimObserver::on_sim_end`] (e.g. `run_ticks`) call this instead.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let row = HealthCountRow::new(report.tick.0, &report.counts);
        let result = self.writer.write_health_counts(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, graph: &Graph) {
        let rows: Vec<AgentSnapshotRow> = graph
            .agents()
            .map(|(_, agent)| AgentSnapshotRow {
                agent:    agent.id.clone(),
                tick:     tick.0,
                location: graph.venue(agent.location).id.clone(),
                health:   agent.health,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _counts: &HealthCounts) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
