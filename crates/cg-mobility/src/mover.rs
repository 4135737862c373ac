//! Applying a location outcome to the graph.

use log::trace;

use cg_core::{AgentId, HealthState, VenueId};
use cg_graph::{Graph, VenueSelector};

use crate::{MobilityResult, Outcome};

/// Venue lock flags frozen at the start of a tick.
///
/// Locks toggled while a tick is running (or between the snapshot and the
/// end of the tick) take effect at the next tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockSnapshot {
    flags: Vec<bool>,
}

impl LockSnapshot {
    pub fn capture(graph: &Graph) -> Self {
        Self { flags: graph.lock_flags() }
    }

    /// Venues past the end of the snapshot count as unlocked.
    #[inline]
    pub fn is_locked(&self, venue: VenueId) -> bool {
        self.flags.get(venue.index()).copied().unwrap_or(false)
    }

    pub fn locked_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }
}

/// What happened to one agent's move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No move was needed (stay, already there, or dead).
    Stayed,
    Moved { from: VenueId, to: VenueId },
    /// The source or the destination was locked.
    Blocked { from: VenueId, to: VenueId },
}

/// Resolves outcomes to venues and relocates agents, honouring a
/// [`LockSnapshot`].
pub struct Mover<'a, S: VenueSelector + ?Sized> {
    locks:    &'a LockSnapshot,
    selector: &'a S,
}

impl<'a, S: VenueSelector + ?Sized> Mover<'a, S> {
    pub fn new(locks: &'a LockSnapshot, selector: &'a S) -> Self {
        Self { locks, selector }
    }

    /// Apply `outcome` to `agent`.
    ///
    /// The move is skipped when the outcome is [`Outcome::Stay`], names the
    /// type of the venue the agent is already at, or is [`Outcome::Base`]
    /// for an agent at home.  Dead agents never move.  A destination is
    /// resolved before locks are consulted, so a missing venue type fails
    /// even if the agent is locked in.
    pub fn move_agent(
        &self,
        graph:   &mut Graph,
        agent:   AgentId,
        outcome: Outcome,
    ) -> MobilityResult<MoveOutcome> {
        let node = graph.agent(agent);
        let from = node.location;
        let here = graph.venue(from).venue_type;

        let redundant = match outcome {
            Outcome::Stay  => true,
            Outcome::Base  => from == node.base,
            Outcome::Go(t) => t == here,
        };
        if redundant || node.health == HealthState::Dead {
            return Ok(MoveOutcome::Stayed);
        }

        let to = match outcome {
            Outcome::Go(t) => self.selector.closest(graph, graph.venue(from).position, t)?,
            _              => node.base,
        };

        if self.locks.is_locked(from) || self.locks.is_locked(to) {
            trace!("{} blocked: {} -> {}", node.id, graph.venue(from).id, graph.venue(to).id);
            return Ok(MoveOutcome::Blocked { from, to });
        }

        trace!("{} moves {} -> {}", node.id, graph.venue(from).id, graph.venue(to).id);
        graph.relocate(agent, to);
        Ok(MoveOutcome::Moved { from, to })
    }
}
