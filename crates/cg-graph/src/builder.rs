//! Initial graph construction from a [`SimulationConfig`].

use log::{debug, warn};

use cg_core::{AgentId, HealthState, RawSimulationConfig, SimRng, SimulationConfig, VenueType};

use crate::{Graph, GraphResult, GridLayout};

/// Fluent builder for the initial [`Graph`].
///
/// # Construction order
///
/// Venues are created type by type in [`VenueType::ALL`] order
/// (houses, temples, hospitals, supermarkets, stations).  Each house is
/// immediately followed by its residents, so node order reads
/// `house-0, house-0-0, house-0-1, …, house-1, …, temple-0, …`.
///
/// # Randomness
///
/// Two draws, in this order:
///
/// 1. `initial_sick_agents` distinct agents are picked uniformly and set
///    to `Sick`.
/// 2. Venue grid placement is shuffled by the [`GridLayout`].
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SimRng::new(42);
/// let graph = GraphBuilder::new(SimulationConfig::default())
///     .layout(GridLayout::default())
///     .build(&mut rng)?;
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    config: SimulationConfig,
    layout: GridLayout,
}

impl GraphBuilder {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config, layout: GridLayout::default() }
    }

    /// Validate untrusted raw input and start a builder from it.
    pub fn from_raw(raw: RawSimulationConfig) -> GraphResult<Self> {
        Ok(Self::new(SimulationConfig::try_from(raw)?))
    }

    /// Override the grid geometry.
    pub fn layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Validate the configuration and build the graph.  Nothing is
    /// allocated if validation fails.
    pub fn build(self, rng: &mut SimRng) -> GraphResult<Graph> {
        let config = &self.config;
        config.validate()?;
        let agent_total = config.total_agents()? as usize;

        let mut graph = Graph::with_capacity(config.total_venues() as usize, agent_total);

        // ── Venues and residents ──────────────────────────────────────────
        for venue_type in VenueType::ALL {
            for i in 0..config.venue_count(venue_type) {
                let label = format!("{venue_type}-{i}");
                let venue = graph.push_venue(label, venue_type);
                if venue_type.is_residential() {
                    for j in 0..config.agents_per_house {
                        graph.push_agent(format!("{venue_type}-{i}-{j}"), venue);
                    }
                }
            }
        }

        // ── Initial infections ────────────────────────────────────────────
        let wanted = config.initial_sick_agents as usize;
        if wanted > agent_total {
            warn!(
                "initialSickAgents = {wanted} exceeds the population of {agent_total}; \
                 infecting everyone"
            );
        }
        for index in rng.sample_indices(agent_total, wanted) {
            graph.set_health(AgentId::from_index(index), HealthState::Sick);
        }

        // ── Layout ────────────────────────────────────────────────────────
        self.layout.apply(&mut graph, rng);

        debug!(
            "built graph: {} venues, {} agents, {} sick",
            graph.venue_count(),
            graph.agent_count(),
            graph.health_counts().sick
        );
        Ok(graph)
    }
}

/// Build the initial graph with the default grid layout.
pub fn build_initial_graph(config: &SimulationConfig, rng: &mut SimRng) -> GraphResult<Graph> {
    GraphBuilder::new(config.clone()).build(rng)
}
