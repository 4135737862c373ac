//! Plain data row types written by output backends.

use cg_core::{HealthCounts, HealthState};

/// Health counts after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthCountRow {
    pub tick:        u64,
    pub susceptible: u64,
    pub sick:        u64,
    pub recovered:   u64,
    pub dead:        u64,
}

impl HealthCountRow {
    pub fn new(tick: u64, counts: &HealthCounts) -> Self {
        Self {
            tick,
            susceptible: counts.susceptible,
            sick:        counts.sick,
            recovered:   counts.recovered,
            dead:        counts.dead,
        }
    }
}

/// Where one agent is and how it is doing at a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    /// Agent label, e.g. `house-3-1`.
    pub agent:    String,
    pub tick:     u64,
    /// Label of the venue the agent is at.
    pub location: String,
    pub health:   HealthState,
}
