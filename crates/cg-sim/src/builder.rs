//! Fluent builder for constructing a [`Simulation`].

use log::info;

use cg_core::{RawSimulationConfig, SimRng, SimulationConfig, SimulationState};
use cg_disease::{DiseaseModel, UpdateMode};
use cg_graph::{GraphBuilder, GridLayout, IndexedVenueSelector, VenueSelector};
use cg_mobility::LocationModel;

use crate::{HealthHistory, Models, SimResult, Simulation};

/// Fluent builder for [`Simulation<S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                              |
/// |---------------------------|--------------------------------------|
/// | `.seed(n)`                | 0                                    |
/// | `.rng(r)`                 | `SimRng::new(seed)`                  |
/// | `.layout(l)`              | `GridLayout::default()` (100 / 600)  |
/// | `.location_model(m)`      | `LocationModel::standard()`          |
/// | `.disease_model(m)`       | `DiseaseModel::standard()`           |
/// | `.update_mode(m)`         | `UpdateMode::InPlace`                |
/// | `.snapshot_interval(n)`   | 1 (every tick)                       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimulationBuilder::new(SimulationConfig::default())
///     .seed(42)
///     .build()?;
/// sim.run_ticks(100, &mut NoopObserver)?;
/// ```
pub struct SimulationBuilder {
    config:            SimulationConfig,
    seed:              u64,
    rng:               Option<SimRng>,
    layout:            GridLayout,
    location:          Option<LocationModel>,
    disease:           Option<DiseaseModel>,
    update_mode:       Option<UpdateMode>,
    snapshot_interval: u64,
}

impl SimulationBuilder {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            seed:              0,
            rng:               None,
            layout:            GridLayout::default(),
            location:          None,
            disease:           None,
            update_mode:       None,
            snapshot_interval: 1,
        }
    }

    /// Validate untrusted raw input and start a builder from it.
    pub fn from_raw(raw: RawSimulationConfig) -> SimResult<Self> {
        Ok(Self::new(SimulationConfig::try_from(raw)?))
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use an existing stream instead of seeding a new one.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn location_model(mut self, model: LocationModel) -> Self {
        self.location = Some(model);
        self
    }

    pub fn disease_model(mut self, model: DiseaseModel) -> Self {
        self.disease = Some(model);
        self
    }

    /// Override the disease model's update mode.
    pub fn update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = Some(mode);
        self
    }

    pub fn snapshot_interval(mut self, ticks: u64) -> Self {
        self.snapshot_interval = ticks;
        self
    }

    /// Build with the R-tree venue selector.
    pub fn build(self) -> SimResult<Simulation<IndexedVenueSelector>> {
        self.build_with_selector(IndexedVenueSelector::default())
    }

    /// Validate the config, build the initial graph, index it with
    /// `selector`, and return a simulation at tick 0.
    pub fn build_with_selector<S: VenueSelector>(self, mut selector: S) -> SimResult<Simulation<S>> {
        let location = match self.location {
            Some(m) => m,
            None    => LocationModel::standard()?,
        };
        let mut disease = match self.disease {
            Some(m) => m,
            None    => DiseaseModel::standard()?,
        };
        if let Some(mode) = self.update_mode {
            disease.mode = mode;
        }

        let mut rng = self.rng.unwrap_or_else(|| SimRng::new(self.seed));
        let graph = GraphBuilder::new(self.config.clone())
            .layout(self.layout)
            .build(&mut rng)?;
        selector.reindex(&graph);

        info!(
            "simulation ready: {} venues, {} agents, {}",
            graph.venue_count(),
            graph.agent_count(),
            graph.health_counts()
        );

        Ok(Simulation {
            config:            self.config,
            layout:            self.layout,
            graph,
            state:             SimulationState::new(),
            models:            Models::new(location, disease),
            selector,
            rng,
            history:           HealthHistory::new(),
            snapshot_interval: self.snapshot_interval,
        })
    }
}
