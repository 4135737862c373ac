//! `cg-mobility` — where agents go each tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`location`] | `Outcome`, `VenueTransitions`, `LocationModel`             |
//! | [`mover`]    | `LockSnapshot`, `Mover`, `MoveOutcome`                     |
//! | [`error`]    | `MobilityError`, `MobilityResult<T>`                       |
//!
//! # Movement model
//!
//! Each tick, for every agent in construction order:
//!
//! 1. [`LocationModel::next_outcome`] draws a symbolic outcome from the
//!    type of the agent's current venue.
//! 2. [`Mover::move_agent`] resolves it to a venue (home, or the nearest of
//!    a type via a [`VenueSelector`](cg_graph::VenueSelector)) and relocates
//!    the agent unless the source or destination is locked.
//!
//! Moves are teleports: an agent is always at exactly one venue.

pub mod error;
pub mod location;
pub mod mover;

#[cfg(test)]
mod tests;

pub use error::{MobilityError, MobilityResult};
pub use location::{LocationModel, Outcome, VenueTransitions};
pub use mover::{LockSnapshot, MoveOutcome, Mover};
