//! Markov transition tables and the weighted draw.
//!
//! A table is an ordered list of `(probability, outcome)` pairs for one
//! source state.  Tables are validated once, at construction; a table that
//! exists is non-empty, has no negative weight, and sums to one within
//! [`SUM_TOLERANCE`].  The per-tick draw never re-checks.

use crate::{CoreError, CoreResult, SimRng};

/// Allowed deviation of a table's total from 1.0.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Outcome distribution for one source state.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionTable<S> {
    entries: Vec<(f64, S)>,
}

impl<S: Copy> TransitionTable<S> {
    /// Validate and build a table.
    pub fn new(entries: Vec<(f64, S)>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::InvalidTable("table has no outcomes".into()));
        }
        if let Some((p, _)) = entries.iter().find(|(p, _)| !p.is_finite() || *p < 0.0) {
            return Err(CoreError::InvalidTable(format!("bad probability {p}")));
        }
        let sum: f64 = entries.iter().map(|(p, _)| p).sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(CoreError::InvalidTable(format!(
                "probabilities sum to {sum}, expected 1"
            )));
        }
        Ok(Self { entries })
    }

    /// A table that always yields `outcome`.
    pub fn certain(outcome: S) -> Self {
        Self { entries: vec![(1.0, outcome)] }
    }

    /// Resolve a uniform draw `u ∈ [0, 1)` to an outcome.
    ///
    /// Returns the first outcome whose cumulative probability reaches `u`.
    /// If rounding leaves the running sum just short of `u`, the last
    /// outcome is returned.
    pub fn draw(&self, u: f64) -> S {
        let mut cumulative = 0.0;
        for &(p, outcome) in &self.entries {
            cumulative += p;
            if cumulative >= u {
                return outcome;
            }
        }
        // Non-empty by construction.
        self.entries[self.entries.len() - 1].1
    }

    /// Weighted random outcome.
    #[inline]
    pub fn sample(&self, rng: &mut SimRng) -> S {
        self.draw(rng.uniform())
    }

    pub fn entries(&self) -> &[(f64, S)] {
        &self.entries
    }

    /// Iterator over the listed outcomes, in table order.
    pub fn outcomes(&self) -> impl Iterator<Item = S> + '_ {
        self.entries.iter().map(|&(_, s)| s)
    }

    /// `true` if the table is a single certain self-transition to `state`.
    pub fn is_self_loop(&self, state: S) -> bool
    where
        S: PartialEq,
    {
        self.entries.iter().all(|&(p, s)| s == state || p == 0.0)
    }
}
