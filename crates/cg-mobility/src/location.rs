//! Where an agent wants to go next.
//!
//! The model is a first-order Markov chain over venue *types*: the next
//! outcome depends only on the type of the venue the agent is at.  Outcomes
//! are symbolic; [`Mover`](crate::Mover) resolves them to a concrete venue.

use std::fmt;

use cg_core::{CoreResult, SimRng, TransitionTable, VenueType};

/// Symbolic result of one location draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Go to the nearest venue of this type.
    Go(VenueType),
    /// Stay put.
    Stay,
    /// Return to the agent's home venue.
    Base,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Go(t) => write!(f, "{t}"),
            Outcome::Stay  => f.write_str("stay"),
            Outcome::Base  => f.write_str("base"),
        }
    }
}

/// One outcome table per venue type, indexed by [`VenueType::index`].
#[derive(Clone, Debug, PartialEq)]
pub struct VenueTransitions {
    tables: [TransitionTable<Outcome>; VenueType::COUNT],
}

impl VenueTransitions {
    /// Build from one table per type, in [`VenueType::ALL`] order.
    pub fn new(tables: [TransitionTable<Outcome>; VenueType::COUNT]) -> Self {
        Self { tables }
    }

    /// The standard town:
    ///
    /// | From        | Outcomes                                               |
    /// |-------------|--------------------------------------------------------|
    /// | house       | supermarket 1/11, station 1/11, hospital 1/11, house 8/11 |
    /// | temple      | supermarket 1/4, base 3/4                              |
    /// | hospital    | hospital 1/4, base 3/4                                 |
    /// | supermarket | base 3/4, supermarket 1/4                              |
    /// | station     | supermarket 1/5, base 3/5, temple 1/5                  |
    pub fn standard() -> CoreResult<Self> {
        use Outcome::{Base, Go};
        use VenueType::*;

        Ok(Self::new([
            TransitionTable::new(vec![
                (1.0 / 11.0, Go(Supermarket)),
                (1.0 / 11.0, Go(Station)),
                (1.0 / 11.0, Go(Hospital)),
                (8.0 / 11.0, Go(House)),
            ])?,
            TransitionTable::new(vec![(0.25, Go(Supermarket)), (0.75, Base)])?,
            TransitionTable::new(vec![(0.25, Go(Hospital)), (0.75, Base)])?,
            TransitionTable::new(vec![(0.75, Base), (0.25, Go(Supermarket))])?,
            TransitionTable::new(vec![(0.2, Go(Supermarket)), (0.6, Base), (0.2, Go(Temple))])?,
        ]))
    }

    #[inline]
    pub fn table(&self, from: VenueType) -> &TransitionTable<Outcome> {
        &self.tables[from.index()]
    }

    /// Replace the table for one venue type.
    pub fn set_table(&mut self, from: VenueType, table: TransitionTable<Outcome>) {
        self.tables[from.index()] = table;
    }
}

/// Venue transition tables plus the house stay rule.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationModel {
    pub transitions: VenueTransitions,

    /// Checked before the table for agents at a residential venue.  A draw
    /// below this returns [`Outcome::Stay`] without consulting the table.
    pub home_stay_probability: f64,
}

impl LocationModel {
    pub const DEFAULT_HOME_STAY: f64 = 0.9;

    pub fn new(transitions: VenueTransitions) -> Self {
        Self { transitions, home_stay_probability: Self::DEFAULT_HOME_STAY }
    }

    /// Standard tables, 0.9 home stay.
    pub fn standard() -> CoreResult<Self> {
        Ok(Self::new(VenueTransitions::standard()?))
    }

    pub fn home_stay_probability(mut self, p: f64) -> Self {
        self.home_stay_probability = p;
        self
    }

    /// Draw the next outcome for an agent at a venue of type `current`.
    ///
    /// Residential venues consume one extra uniform draw for the stay rule;
    /// the table draw happens only if that does not fire.
    pub fn next_outcome(&self, current: VenueType, rng: &mut SimRng) -> Outcome {
        if current.is_residential() && rng.uniform() < self.home_stay_probability {
            return Outcome::Stay;
        }
        self.transitions.table(current).sample(rng)
    }
}
