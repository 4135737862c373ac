//! `cg-sim` — tick loop and run lifecycle for the contagion simulator.
//!
//! # One tick
//!
//! ```text
//! ① Locks     — snapshot every venue's lock flag.
//! ② Movement  — for each agent in construction order:
//!                 LocationModel::next_outcome → VenueSelector → Mover
//!               (a missing venue type leaves the agent in place).
//! ③ Disease   — DiseaseModel::apply once over all venues.
//! ④ Clock     — tick += 1; health counts appended to the history.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cg_core::SimulationConfig;
//! use cg_sim::{NoopObserver, SimulationBuilder};
//!
//! let mut sim = SimulationBuilder::new(SimulationConfig::default())
//!     .seed(42)
//!     .build()?;
//! sim.toggle_lock("hospital-0")?;
//! sim.run_until_contained(1_000, &mut NoopObserver)?;
//! println!("{}", sim.counts());
//! ```

pub mod builder;
pub mod error;
pub mod history;
pub mod observer;
pub mod sim;
pub mod step;

#[cfg(test)]
mod tests;

pub use builder::SimulationBuilder;
pub use error::{SimError, SimResult};
pub use history::{HealthHistory, HistoryEntry};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulation;
pub use step::{Models, TickReport, advance_tick};
