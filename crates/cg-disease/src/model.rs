use std::fmt;

use log::trace;

use cg_core::{AgentId, CoreError, CoreResult, HealthState, SimRng, TransitionTable};
use cg_graph::Graph;

type StateTables = [TransitionTable<HealthState>; HealthState::COUNT];

/// Which health values the pass reads when deciding who is infectious.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    /// Read live values: an agent infected earlier in the pass infects
    /// fellows processed after it, and an agent that dies mid-pass stops
    /// acting as a source.  Results depend on agent order.
    #[default]
    InPlace,
    /// Read start-of-tick values for sources.  Each fellow's own chain still
    /// advances draw by draw and is written as it goes.
    Snapshot,
}

/// Health transitions observed during one pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiseaseReport {
    /// Susceptible → Sick.
    pub infections: u64,
    /// Sick → Recovered.
    pub recoveries: u64,
    /// Sick → Dead.
    pub deaths: u64,
}

impl DiseaseReport {
    fn record(&mut self, before: HealthState, after: HealthState) {
        match (before, after) {
            (HealthState::Susceptible, HealthState::Sick) => self.infections += 1,
            (HealthState::Sick, HealthState::Recovered)   => self.recoveries += 1,
            (HealthState::Sick, HealthState::Dead)        => self.deaths += 1,
            _ => {}
        }
    }

    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for DiseaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{} infected, +{} recovered, +{} dead",
            self.infections, self.recoveries, self.deaths
        )
    }
}

/// Contagion and progression tables plus the update mode.
///
/// Both table sets are indexed by [`HealthState::index`].  Recovered and
/// Dead must be absorbing in both; [`DiseaseModel::new`] rejects tables that
/// let an agent leave either state.
#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseModel {
    contagion:   StateTables,
    progression: StateTables,
    pub mode:    UpdateMode,
}

impl DiseaseModel {
    pub fn new(contagion: StateTables, progression: StateTables) -> CoreResult<Self> {
        for (name, tables) in [("contagion", &contagion), ("progression", &progression)] {
            for state in [HealthState::Recovered, HealthState::Dead] {
                if !tables[state.index()].is_self_loop(state) {
                    return Err(CoreError::InvalidTable(format!(
                        "{name} table lets agents leave the {state} state"
                    )));
                }
            }
        }
        Ok(Self { contagion, progression, mode: UpdateMode::default() })
    }

    /// Standard SIR parameters: 30 % transmission per exposure, 0.4 %
    /// recovery and 0.1 % death per progression draw.
    pub fn standard() -> CoreResult<Self> {
        use HealthState::*;

        let contagion = [
            TransitionTable::new(vec![(0.3, Sick), (0.7, Susceptible)])?,
            TransitionTable::certain(Sick),
            TransitionTable::certain(Recovered),
            TransitionTable::certain(Dead),
        ];
        let progression = [
            TransitionTable::certain(Susceptible),
            TransitionTable::new(vec![(0.995, Sick), (0.004, Recovered), (0.001, Dead)])?,
            TransitionTable::certain(Recovered),
            TransitionTable::certain(Dead),
        ];
        Self::new(contagion, progression)
    }

    pub fn mode(mut self, mode: UpdateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn contagion(&self, state: HealthState) -> &TransitionTable<HealthState> {
        &self.contagion[state.index()]
    }

    pub fn progression(&self, state: HealthState) -> &TransitionTable<HealthState> {
        &self.progression[state.index()]
    }

    /// One fellow step: contagion draw if `exposed`, then a progression draw.
    pub fn step(&self, state: HealthState, exposed: bool, rng: &mut SimRng) -> HealthState {
        self.advance(state, exposed, rng, &mut DiseaseReport::default())
    }

    fn advance(
        &self,
        mut state: HealthState,
        exposed:   bool,
        rng:       &mut SimRng,
        report:    &mut DiseaseReport,
    ) -> HealthState {
        if exposed {
            let next = self.contagion(state).sample(rng);
            report.record(state, next);
            state = next;
        }
        let next = self.progression(state).sample(rng);
        report.record(state, next);
        next
    }

    /// Run the pass over every venue and write the new health states.
    pub fn apply(&self, graph: &mut Graph, rng: &mut SimRng) -> DiseaseReport {
        let start: Option<Vec<HealthState>> = match self.mode {
            UpdateMode::InPlace  => None,
            UpdateMode::Snapshot => Some(graph.agents().map(|(_, a)| a.health).collect()),
        };
        let source_state = |graph: &Graph, id: AgentId| match &start {
            Some(states) => states[id.index()],
            None         => graph.health(id),
        };

        let mut report = DiseaseReport::default();
        let mut fellows: Vec<AgentId> = Vec::new();

        for index in 0..graph.agent_count() {
            let source = AgentId::from_index(index);
            let state = source_state(&*graph, source);
            if !state.is_alive() {
                continue;
            }
            let exposed = state == HealthState::Sick;

            fellows.clear();
            fellows.extend(graph.fellows(source));

            for &fellow in &fellows {
                let before = graph.health(fellow);
                let after = self.advance(before, exposed, rng, &mut report);
                if after != before {
                    trace!("{}: {} -> {}", graph.agent(fellow).id, before, after);
                    graph.set_health(fellow, after);
                }
            }
        }
        report
    }
}
