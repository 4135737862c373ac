//! SIR health states and population tallies.

/// An agent's position in the Susceptible–Sick–Recovered–Dead chain.
///
/// `Dead` is absorbing: once reached, no table ever leaves it and the agent
/// stops moving.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    #[default]
    Susceptible,
    Sick,
    Recovered,
    Dead,
}

impl HealthState {
    pub const ALL: [HealthState; 4] = [
        HealthState::Susceptible,
        HealthState::Sick,
        HealthState::Recovered,
        HealthState::Dead,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Dense index in `0..COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_alive(self) -> bool {
        self != HealthState::Dead
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Sick        => "sick",
            HealthState::Recovered   => "recovered",
            HealthState::Dead        => "dead",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── HealthCounts ──────────────────────────────────────────────────────────────

/// Number of agents in each health state at one instant.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct HealthCounts {
    pub susceptible: u64,
    pub sick:        u64,
    pub recovered:   u64,
    pub dead:        u64,
}

impl HealthCounts {
    /// Tally an iterator of states.
    pub fn tally(states: impl IntoIterator<Item = HealthState>) -> Self {
        let mut counts = HealthCounts::default();
        for state in states {
            counts.add(state);
        }
        counts
    }

    #[inline]
    pub fn add(&mut self, state: HealthState) {
        match state {
            HealthState::Susceptible => self.susceptible += 1,
            HealthState::Sick        => self.sick += 1,
            HealthState::Recovered   => self.recovered += 1,
            HealthState::Dead        => self.dead += 1,
        }
    }

    #[inline]
    pub fn get(&self, state: HealthState) -> u64 {
        match state {
            HealthState::Susceptible => self.susceptible,
            HealthState::Sick        => self.sick,
            HealthState::Recovered   => self.recovered,
            HealthState::Dead        => self.dead,
        }
    }

    /// Sum over all states.  Equals the population at every tick.
    #[inline]
    pub fn total(&self) -> u64 {
        self.susceptible + self.sick + self.recovered + self.dead
    }

    /// Agents not yet dead.
    #[inline]
    pub fn alive(&self) -> u64 {
        self.total() - self.dead
    }
}

impl std::fmt::Display for HealthCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "S={} I={} R={} D={}",
            self.susceptible, self.sick, self.recovered, self.dead
        )
    }
}
