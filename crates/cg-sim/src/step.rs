//! One simulation step as a free function over explicit state.

use std::fmt;

use log::{debug, warn};

use cg_core::{AgentId, HealthCounts, SimRng, SimulationState, Tick};
use cg_disease::{DiseaseModel, DiseaseReport};
use cg_graph::{Graph, VenueSelector};
use cg_mobility::{LocationModel, LockSnapshot, MobilityError, MoveOutcome, Mover};

use crate::SimResult;

/// The stochastic models a step runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Models {
    pub location: LocationModel,
    pub disease:  DiseaseModel,
}

impl Models {
    pub fn new(location: LocationModel, disease: DiseaseModel) -> Self {
        Self { location, disease }
    }

    /// Standard town tables and SIR parameters.
    pub fn standard() -> SimResult<Self> {
        Ok(Self::new(LocationModel::standard()?, DiseaseModel::standard()?))
    }
}

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The tick that ran (0 for the first step after a start).
    pub tick: Tick,
    /// Agents that changed venue.
    pub moves: u64,
    /// Moves refused because the source or destination was locked.
    pub blocked_moves: u64,
    /// Moves that named a venue type with no venues; the agent stayed.
    pub failed_moves: u64,
    pub disease: DiseaseReport,
    /// Health counts after the disease pass.
    pub counts: HealthCounts,
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} moved, {} blocked, {} failed; {}; {}",
            self.tick,
            self.moves,
            self.blocked_moves,
            self.failed_moves,
            self.disease,
            self.counts
        )
    }
}

/// Advance `graph` by one tick and bump `state`.
///
/// Phases:
///
/// 1. snapshot the venue locks;
/// 2. for every agent in construction order, draw a location outcome and
///    apply it through the [`Mover`];
/// 3. run the disease pass once;
/// 4. advance the tick counter.
///
/// A move to a venue type with no venues is not an error for the step: the
/// agent stays, a warning is logged, and the move is counted in
/// [`TickReport::failed_moves`].
pub fn advance_tick<S: VenueSelector + ?Sized>(
    state:    &mut SimulationState,
    graph:    &mut Graph,
    models:   &Models,
    selector: &S,
    rng:      &mut SimRng,
) -> SimResult<TickReport> {
    let mut report = TickReport { tick: state.tick, ..TickReport::default() };

    // ── Phase 1: freeze locks ─────────────────────────────────────────────
    let locks = LockSnapshot::capture(graph);
    let mover = Mover::new(&locks, selector);

    // ── Phase 2: movement ─────────────────────────────────────────────────
    for index in 0..graph.agent_count() {
        let agent = AgentId::from_index(index);
        let here = graph.venue(graph.location(agent)).venue_type;
        let outcome = models.location.next_outcome(here, rng);

        match mover.move_agent(graph, agent, outcome) {
            Ok(MoveOutcome::Stayed)           => {}
            Ok(MoveOutcome::Moved { .. })     => report.moves += 1,
            Ok(MoveOutcome::Blocked { .. })   => report.blocked_moves += 1,
            Err(MobilityError::NoCandidate(venue_type)) => {
                warn!(
                    "{}: {} wanted a {venue_type} but none exist; staying",
                    report.tick,
                    graph.agent(agent).id
                );
                report.failed_moves += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    // ── Phase 3: disease ──────────────────────────────────────────────────
    report.disease = models.disease.apply(graph, rng);
    report.counts = graph.health_counts();

    // ── Phase 4: clock ────────────────────────────────────────────────────
    *state = state.next();

    debug!("{report}");
    Ok(report)
}
