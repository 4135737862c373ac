//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  A tick has no
//! wall-clock meaning inside the core: an external timer decides how often
//! ticks are requested.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimulationState ───────────────────────────────────────────────────────────

/// Scalar run state carried between ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SimulationState {
    /// Completed ticks since the last (re)start.
    pub tick: Tick,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state after one more completed tick.
    #[inline]
    pub fn next(self) -> Self {
        Self { tick: self.tick + 1 }
    }
}
