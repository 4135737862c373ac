//! Simulation observer trait for progress reporting and data collection.

use cg_core::{HealthCounts, SimulationConfig, Tick};
use cg_graph::Graph;

use crate::TickReport;

/// Callbacks invoked by [`Simulation`][crate::Simulation] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         if report.tick.0 % self.interval == 0 {
///             println!("{}: {}", report.tick, report.counts);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the lock snapshot.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the disease pass with the tick's summary.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called every `snapshot_interval` completed ticks with read-only access
    /// to the graph, so writers can record agent locations and health
    /// without the simulation knowing about any output format.
    ///
    /// `tick` is the number of completed ticks, i.e. the graph state *after*
    /// that many steps.
    fn on_snapshot(&mut self, _tick: Tick, _graph: &Graph) {}

    /// Called after a restart has rebuilt the graph.
    fn on_restart(&mut self, _config: &SimulationConfig) {}

    /// Called once when a run to completion stops.
    fn on_sim_end(&mut self, _final_tick: Tick, _counts: &HealthCounts) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
