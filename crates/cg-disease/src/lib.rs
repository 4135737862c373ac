//! `cg-disease` — the once-per-tick health update.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`model`]  | `DiseaseModel`, `UpdateMode`, `DiseaseReport`                |
//!
//! # Model
//!
//! Agents interact only with *fellows*: the other agents at the same venue.
//! For every live agent A (construction order) and each fellow B of A:
//!
//! 1. if A is Sick, B takes a **contagion** draw
//!    (Susceptible → Sick 0.30, otherwise unchanged);
//! 2. B then takes a **progression** draw
//!    (Sick → Sick 0.995 / Recovered 0.004 / Dead 0.001, otherwise unchanged).
//!
//! A fellow therefore gets one progression draw per live co-occupant, and
//! an empty venue or a lone agent sees no change at all.

pub mod model;


pub use model::{DiseaseModel, DiseaseReport, UpdateMode};
