//! `cg-output` — simulation output writers for the contagion simulator.
//!
//! | Backend | Files created                                  |
//! |---------|------------------------------------------------|
//! | CSV     | `health_counts.csv`, `agent_snapshots.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `cg_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cg_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run_until_contained(1_000, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::{AGENT_SNAPSHOTS_FILE, CsvWriter, HEALTH_COUNTS_FILE};
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, HealthCountRow};
pub use writer::OutputWriter;
