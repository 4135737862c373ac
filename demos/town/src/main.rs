//! town — command-line demo for the contagion simulator.
//!
//! Builds the default 42-house town (or one read from a JSON config in the
//! `{"houses": …, "agentsPerHouse": …}` format), seeds one infection, and
//! runs the venue/SIR model tick by tick.  Health counts go to
//! `health_counts.csv`, agent locations to `agent_snapshots.csv`, and the
//! final graph to `final_graph.json`.

mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use cg_core::{HealthCounts, SimulationConfig, Tick};
use cg_disease::UpdateMode;
use cg_graph::Graph;
use cg_output::{
    AGENT_SNAPSHOTS_FILE, CsvWriter, HEALTH_COUNTS_FILE, OutputWriter, SimOutputObserver,
};
use cg_sim::{SimObserver, SimulationBuilder, TickReport};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "town", version, about = "Venue-based SIR epidemic in a small town")]
struct Args {
    /// JSON town config; defaults to 42 houses of 9 with one sick agent.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 500)]
    ticks: u64,

    /// Stop early once nobody is sick.
    #[arg(long)]
    until_contained: bool,

    /// Directory for the CSV output.
    #[arg(long, value_name = "DIR", default_value = "output/town")]
    output: PathBuf,

    /// Lock a venue by label before the first tick (repeatable).
    #[arg(long = "lock", value_name = "LABEL")]
    locks: Vec<String>,

    /// Write agent snapshots every N ticks (0 = never).
    #[arg(long, default_value_t = 10)]
    snapshot_interval: u64,

    /// Judge infectiousness from start-of-tick health.
    #[arg(long)]
    snapshot_disease: bool,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

// ── Observer wrapper to count rows and report progress ────────────────────────

const PROGRESS_INTERVAL: u64 = 50;

/// Final graph state, for renderers.
const FINAL_GRAPH_FILE: &str = "final_graph.json";

struct ProgressObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    count_rows:    usize,
    snapshot_rows: usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, count_rows: 0, snapshot_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        self.count_rows += 1;
        if (report.tick.0 + 1).is_multiple_of(PROGRESS_INTERVAL) {
            info!("{report}");
        }
        self.inner.on_tick_end(report);
    }

    fn on_snapshot(&mut self, tick: Tick, graph: &Graph) {
        self.snapshot_rows += graph.agent_count();
        self.inner.on_snapshot(tick, graph);
    }

    fn on_sim_end(&mut self, final_tick: Tick, counts: &HealthCounts) {
        self.inner.on_sim_end(final_tick, counts);
    }
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level)?;

    let config = load_config(args.config.as_deref())?;
    println!("=== town — venue SIR simulation ===");
    println!(
        "Houses: {} × {}  |  Initially sick: {}  |  Seed: {}",
        config.house_count, config.agents_per_house, config.initial_sick_agents, args.seed
    );
    println!();

    // 1. Build the simulation.
    let mode = if args.snapshot_disease { UpdateMode::Snapshot } else { UpdateMode::InPlace };
    let mut sim = SimulationBuilder::new(config)
        .seed(args.seed)
        .update_mode(mode)
        .snapshot_interval(args.snapshot_interval)
        .build()?;
    println!(
        "Graph: {} venues, {} agents",
        sim.graph.venue_count(),
        sim.graph.agent_count()
    );

    // 2. Quarantines.
    for label in &args.locks {
        sim.set_locked(label, true)
            .with_context(|| format!("locking {label}"))?;
        println!("Locked {label}");
    }

    // 3. Output.
    let writer = CsvWriter::new(&args.output)?;
    let mut obs = ProgressObserver::new(SimOutputObserver::new(writer));

    // 4. Run.
    let t0 = Instant::now();
    let ran = if args.until_contained {
        sim.run_until_contained(args.ticks, &mut obs)?
    } else {
        sim.run_ticks(args.ticks, &mut obs)?;
        obs.inner.finish()?;
        args.ticks
    };
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    let graph_path = args.output.join(FINAL_GRAPH_FILE);
    let json = serde_json::to_string_pretty(&sim.snapshot())?;
    fs::write(&graph_path, json)
        .with_context(|| format!("writing {}", graph_path.display()))?;

    // 5. Summary.
    let counts = sim.counts();
    println!();
    println!("Ran {ran} ticks in {:.3} s", elapsed.as_secs_f64());
    println!("  {:<20}: {} rows", HEALTH_COUNTS_FILE, obs.count_rows);
    println!("  {:<20}: {} rows", AGENT_SNAPSHOTS_FILE, obs.snapshot_rows);
    println!("  {:<20}: tick {}", FINAL_GRAPH_FILE, sim.tick());
    println!();
    println!("{:<12} {:>8}", "State", "Agents");
    println!("{}", "-".repeat(21));
    println!("{:<12} {:>8}", "population", counts.total());
    println!("{:<12} {:>8}", "susceptible", counts.susceptible);
    println!("{:<12} {:>8}", "sick", counts.sick);
    println!("{:<12} {:>8}", "recovered", counts.recovered);
    println!("{:<12} {:>8}", "dead", counts.dead);
    if let Some(peak) = sim.history.peak_sick() {
        println!();
        println!("Peak: {} sick at {}", peak.counts.sick, peak.tick);
    }

    Ok(())
}
