//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `health_counts.csv` — `tick,susceptible,sick,recovered,dead`
//! - `agent_snapshots.csv` — `agent,tick,location,health`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, HealthCountRow, OutputResult};

pub const HEALTH_COUNTS_FILE: &str = "health_counts.csv";
pub const AGENT_SNAPSHOTS_FILE: &str = "agent_snapshots.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    counts:    Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files, and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut counts = Writer::from_path(dir.join(HEALTH_COUNTS_FILE))?;
        counts.write_record(["tick", "susceptible", "sick", "recovered", "dead"])?;

        let mut snapshots = Writer::from_path(dir.join(AGENT_SNAPSHOTS_FILE))?;
        snapshots.write_record(["agent", "tick", "location", "health"])?;

        Ok(Self {
            counts,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_health_counts(&mut self, row: &HealthCountRow) -> OutputResult<()> {
        self.counts.write_record(&[
            row.tick.to_string(),
            row.susceptible.to_string(),
            row.sick.to_string(),
            row.recovered.to_string(),
            row.dead.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record([
                row.agent.as_str(),
                row.tick.to_string().as_str(),
                row.location.as_str(),
                row.health.as_str(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
