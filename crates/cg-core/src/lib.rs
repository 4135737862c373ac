//! `cg-core` — foundational types for the `contagion` simulator.
//!
//! This crate is a dependency of every other `cg-*` crate.  It has no `cg-*`
//! dependencies and few external ones (`rand`, `thiserror`, `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `VenueId`                                       |
//! | [`geo`]     | `Point`, Euclidean distance                                |
//! | [`venue`]   | `VenueType` enum                                           |
//! | [`health`]  | `HealthState`, `HealthCounts`                              |
//! | [`time`]    | `Tick`, `SimulationState`                                  |
//! | [`rng`]     | `SimRng` (seedable, explicit)                              |
//! | [`table`]   | `TransitionTable<S>` and the weighted draw                 |
//! | [`config`]  | `SimulationConfig`, `RawSimulationConfig`                  |
//! | [`error`]   | `CoreError`, `CoreResult`                                  |
//!
//! Every public data type derives `Serialize`/`Deserialize`; the config
//! types need it for JSON input and the rest ride along for snapshots.

pub mod config;
pub mod error;
pub mod geo;
pub mod health;
pub mod ids;
pub mod rng;
pub mod table;
pub mod time;
pub mod venue;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RawCount, RawSimulationConfig, SimulationConfig};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use health::{HealthCounts, HealthState};
pub use ids::{AgentId, VenueId};
pub use rng::SimRng;
pub use table::{SUM_TOLERANCE, TransitionTable};
pub use time::{SimulationState, Tick};
pub use venue::VenueType;
