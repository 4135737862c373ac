//! The `Simulation` struct and its run loops.

use log::info;

use cg_core::{HealthCounts, SimRng, SimulationConfig, SimulationState, Tick};
use cg_graph::{Graph, GraphBuilder, GraphSnapshot, GridLayout, IndexedVenueSelector, VenueSelector};

use crate::{HealthHistory, Models, SimObserver, SimResult, TickReport, advance_tick};

/// The main simulation runner.
///
/// `Simulation<S>` owns the graph, the tick counter, the models, the RNG
/// stream, and the nearest-venue selector `S`.  Every mutating method takes
/// `&mut self`, so observers and callers always see whole ticks.
///
/// Lock changes made through [`toggle_lock`](Self::toggle_lock) or
/// [`set_locked`](Self::set_locked) apply from the next tick.
///
/// Create via [`SimulationBuilder`][crate::SimulationBuilder].
pub struct Simulation<S: VenueSelector = IndexedVenueSelector> {
    /// Configuration the current graph was built from.
    pub config: SimulationConfig,

    /// Venue grid used for every (re)build.
    pub layout: GridLayout,

    pub graph: Graph,

    /// Completed ticks since the last (re)start.
    pub state: SimulationState,

    pub models: Models,

    /// Nearest-venue selection, reindexed on every rebuild.
    pub selector: S,

    /// The single random stream.  Restarts continue it rather than reseed.
    pub rng: SimRng,

    /// Health counts after each completed tick.
    pub history: HealthHistory,

    /// Call [`SimObserver::on_snapshot`] every this many ticks; 0 disables.
    pub snapshot_interval: u64,
}

impl<S: VenueSelector> Simulation<S> {
    // ── Public API ────────────────────────────────────────────────────────

    #[inline]
    pub fn tick(&self) -> Tick {
        self.state.tick
    }

    /// Current health counts.
    pub fn counts(&self) -> HealthCounts {
        self.graph.health_counts()
    }

    /// `true` once nobody is sick.  Without a sick agent there is no
    /// further transmission, so the epidemic is over.
    pub fn is_contained(&self) -> bool {
        self.counts().sick == 0
    }

    /// Run a single tick without observer callbacks.
    pub fn step(&mut self) -> SimResult<TickReport> {
        let report = advance_tick(
            &mut self.state,
            &mut self.graph,
            &self.models,
            &self.selector,
            &mut self.rng,
        )?;
        self.history.record(report.tick, report.counts);
        Ok(report)
    }

    /// Run exactly `n` ticks from the current position.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_step(observer)?;
        }
        Ok(())
    }

    /// Run until no agent is sick or `max_ticks` more ticks have run,
    /// whichever comes first.  Returns the number of ticks run.
    ///
    /// Calls [`SimObserver::on_sim_end`] when it stops.
    pub fn run_until_contained<O: SimObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> SimResult<u64> {
        let mut ran = 0;
        while ran < max_ticks && !self.is_contained() {
            self.observed_step(observer)?;
            ran += 1;
        }
        info!("stopped after {ran} ticks at {}: {}", self.tick(), self.counts());
        observer.on_sim_end(self.tick(), &self.counts());
        Ok(ran)
    }

    /// Discard the current run and build a fresh graph from `config`.
    ///
    /// The tick returns to zero and the history is cleared.  The RNG stream
    /// carries on, so a restart with the same config yields a new town.
    /// On error the current run is left untouched.
    pub fn restart<O: SimObserver>(
        &mut self,
        config:   SimulationConfig,
        observer: &mut O,
    ) -> SimResult<()> {
        let graph = GraphBuilder::new(config.clone())
            .layout(self.layout)
            .build(&mut self.rng)?;
        self.selector.reindex(&graph);
        self.graph = graph;
        self.config = config;
        self.state = SimulationState::new();
        self.history.clear();

        info!(
            "restarted: {} venues, {} agents, {}",
            self.graph.venue_count(),
            self.graph.agent_count(),
            self.counts()
        );
        observer.on_restart(&self.config);
        Ok(())
    }

    /// Flip a venue's lock by label; returns the new value.
    pub fn toggle_lock(&mut self, label: &str) -> SimResult<bool> {
        Ok(self.graph.toggle_lock(label)?)
    }

    pub fn set_locked(&mut self, label: &str, locked: bool) -> SimResult<()> {
        Ok(self.graph.set_locked_by_label(label, locked)?)
    }

    /// Owned copy of the graph for renderers.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.graph, self.tick())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(self.tick());
        let report = self.step()?;
        observer.on_tick_end(&report);

        let done = self.tick();
        if self.snapshot_interval > 0 && done.0.is_multiple_of(self.snapshot_interval) {
            observer.on_snapshot(done, &self.graph);
        }
        Ok(())
    }
}
