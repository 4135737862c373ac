//! Integration tests for cg-sim.

use cg_core::{HealthCounts, SimulationConfig, Tick};
use cg_graph::Graph;

use crate::{SimObserver, TickReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn small_config() -> SimulationConfig {
    SimulationConfig {
        house_count:         2,
        agents_per_house:    3,
        bus_station_count:   1,
        hospital_count:      1,
        supermarket_count:   1,
        temple_count:        1,
        initial_sick_agents: 1,
    }
}

/// Records every hook call.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    reports:   Vec<TickReport>,
    snapshots: Vec<Tick>,
    restarts:  usize,
    ended:     Option<(Tick, HealthCounts)>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_tick_end(&mut self, report: &TickReport) {
        self.reports.push(*report);
    }
    fn on_snapshot(&mut self, tick: Tick, graph: &Graph) {
        assert!(graph.is_consistent());
        self.snapshots.push(tick);
    }
    fn on_restart(&mut self, _config: &SimulationConfig) {
        self.restarts += 1;
    }
    fn on_sim_end(&mut self, final_tick: Tick, counts: &HealthCounts) {
        self.ended = Some((final_tick, *counts));
    }
}

// ── SimulationBuilder ─────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use cg_core::{RawCount, RawSimulationConfig, SimRng};
    use cg_disease::UpdateMode;
    use cg_graph::LinearVenueSelector;

    use super::*;
    use crate::{SimError, SimulationBuilder};

    #[test]
    fn builds_at_tick_zero() {
        let sim = SimulationBuilder::new(small_config()).seed(1).build().unwrap();
        assert_eq!(sim.tick(), Tick::ZERO);
        assert_eq!(sim.graph.venue_count(), 6);
        assert_eq!(sim.graph.agent_count(), 6);
        assert_eq!(sim.graph.edges().len(), 6);
        assert_eq!(sim.counts().sick, 1);
        assert_eq!(sim.counts().susceptible, 5);
        assert!(sim.history.is_empty());
    }

    #[test]
    fn raw_config_validated_first() {
        let raw = RawSimulationConfig {
            agents_per_house: Some(RawCount::Number(2.5)),
            ..RawSimulationConfig::default()
        };
        let err = SimulationBuilder::from_raw(raw).err().unwrap();
        assert!(matches!(err, SimError::Core(_)));
    }

    #[test]
    fn overflowing_config_is_a_core_error() {
        let bad = SimulationConfig { house_count: u32::MAX, agents_per_house: 2, ..small_config() };
        let err = SimulationBuilder::new(bad).build().err().unwrap();
        assert!(matches!(err, SimError::Core(cg_core::CoreError::Configuration { .. })));
        let msg = err.to_string();
        assert_eq!(msg.matches("configuration error").count(), 1, "{msg}");
    }

    #[test]
    fn table_error_message_is_not_relabelled() {
        let err = SimError::from(cg_core::CoreError::InvalidTable("empty".into()));
        assert_eq!(err.to_string(), "invalid transition table: empty");
    }

    #[test]
    fn update_mode_override() {
        let sim = SimulationBuilder::new(small_config())
            .update_mode(UpdateMode::Snapshot)
            .build_with_selector(LinearVenueSelector)
            .unwrap();
        assert_eq!(sim.models.disease.mode, UpdateMode::Snapshot);
    }

    #[test]
    fn explicit_rng_matches_seed() {
        let a = SimulationBuilder::new(small_config()).seed(9).build().unwrap();
        let b = SimulationBuilder::new(small_config()).rng(SimRng::new(9)).build().unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

// ── Tick invariants ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use cg_core::{HealthState, SimRng, SimulationState, VenueType};
    use cg_graph::{GraphBuilder, LinearVenueSelector};

    use super::*;
    use crate::{Models, NoopObserver, SimulationBuilder, advance_tick};

    #[test]
    fn advance_tick_bumps_state() {
        let mut rng = SimRng::new(4);
        let mut graph = GraphBuilder::new(small_config()).build(&mut rng).unwrap();
        let models = Models::standard().unwrap();
        let mut state = SimulationState::new();

        let report = advance_tick(&mut state, &mut graph, &models, &LinearVenueSelector, &mut rng)
            .unwrap();
        assert_eq!(report.tick, Tick(0));
        assert_eq!(state.tick, Tick(1));
        assert_eq!(report.counts, graph.health_counts());
    }

    #[test]
    fn population_and_edges_conserved() {
        let mut sim = SimulationBuilder::new(SimulationConfig::default()).seed(2).build().unwrap();
        let population = sim.graph.agent_count() as u64;
        for _ in 0..200 {
            let report = sim.step().unwrap();
            assert_eq!(report.counts.total(), population);
            assert_eq!(sim.graph.edges().len(), sim.graph.agent_count());
            assert!(sim.graph.is_consistent());
        }
    }

    #[test]
    fn dead_is_absorbing() {
        let config = SimulationConfig { initial_sick_agents: 40, ..SimulationConfig::default() };
        let mut sim = SimulationBuilder::new(config).seed(3).build().unwrap();
        let mut dead = Vec::new();
        for _ in 0..300 {
            sim.step().unwrap();
            for (id, agent) in sim.graph.agents() {
                if agent.health == HealthState::Dead && !dead.contains(&id) {
                    dead.push(id);
                }
            }
            assert!(dead.iter().all(|&id| sim.graph.health(id) == HealthState::Dead));
        }
    }

    #[test]
    fn dead_agents_never_move() {
        let config = SimulationConfig { initial_sick_agents: 40, ..SimulationConfig::default() };
        let mut sim = SimulationBuilder::new(config).seed(5).build().unwrap();
        for _ in 0..300 {
            let before: Vec<_> = sim
                .graph
                .agents()
                .filter(|(_, a)| a.health == HealthState::Dead)
                .map(|(id, a)| (id, a.location))
                .collect();
            sim.step().unwrap();
            for (id, location) in before {
                assert_eq!(sim.graph.location(id), location);
            }
        }
    }

    #[test]
    fn no_seed_stays_healthy() {
        let config = SimulationConfig { initial_sick_agents: 0, ..small_config() };
        let mut sim = SimulationBuilder::new(config).seed(6).build().unwrap();
        sim.run_ticks(50, &mut NoopObserver).unwrap();
        assert_eq!(sim.counts().susceptible, 6);
        assert_eq!(sim.tick(), Tick(50));
    }

    #[test]
    fn missing_venue_type_fails_moves_not_ticks() {
        let config = SimulationConfig {
            hospital_count: 0,
            bus_station_count: 0,
            ..SimulationConfig::default()
        };
        let mut sim = SimulationBuilder::new(config).seed(7).build().unwrap();
        let mut failed = 0;
        for _ in 0..100 {
            failed += sim.step().unwrap().failed_moves;
        }
        assert!(failed > 0);
        assert!(sim.graph.venues_of_type(VenueType::Hospital).is_empty());
        assert!(sim.graph.is_consistent());
    }
}

// ── Locks ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lock_tests {
    use cg_core::VenueType;

    use super::*;
    use crate::{SimError, SimulationBuilder};

    #[test]
    fn locked_house_keeps_residents() {
        let config = SimulationConfig { house_count: 1, agents_per_house: 9, ..small_config() };
        let mut sim = SimulationBuilder::new(config).seed(8).build().unwrap();
        sim.toggle_lock("house-0").unwrap();

        let before: Vec<_> = sim.graph.agents().map(|(_, a)| a.location).collect();
        let report = sim.step().unwrap();
        let after: Vec<_> = sim.graph.agents().map(|(_, a)| a.location).collect();
        assert_eq!(before, after);
        assert_eq!(report.moves, 0);
    }

    #[test]
    fn locked_venue_has_no_traffic() {
        let mut sim = SimulationBuilder::new(SimulationConfig::default()).seed(9).build().unwrap();
        for _ in 0..30 {
            sim.step().unwrap();
        }
        let shop = sim.graph.venues_of_type(VenueType::Supermarket)[0];
        let label = sim.graph.venue(shop).id.clone();
        sim.set_locked(&label, true).unwrap();

        for _ in 0..30 {
            let inside = sim.graph.occupants(shop).to_vec();
            sim.step().unwrap();
            assert_eq!(sim.graph.occupants(shop), inside.as_slice());
        }

        sim.set_locked(&label, false).unwrap();
        assert!(!sim.graph.is_locked(shop));
    }

    #[test]
    fn unknown_label() {
        let mut sim = SimulationBuilder::new(small_config()).build().unwrap();
        assert!(matches!(sim.toggle_lock("mall-0"), Err(SimError::Graph(_))));
        assert!(matches!(sim.set_locked("house-0-0", true), Err(SimError::Graph(_))));
    }
}

// ── Runs, history, observers ──────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{NoopObserver, SimulationBuilder};

    #[test]
    fn observer_sees_every_tick() {
        let mut sim = SimulationBuilder::new(small_config())
            .seed(10)
            .snapshot_interval(5)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(12, &mut rec).unwrap();

        assert_eq!(rec.starts, (0..12).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.reports.len(), 12);
        assert_eq!(rec.reports[11].tick, Tick(11));
        assert_eq!(rec.snapshots, vec![Tick(5), Tick(10)]);
        assert!(rec.ended.is_none());
    }

    #[test]
    fn history_grows_per_tick() {
        let mut sim = SimulationBuilder::new(small_config()).seed(11).build().unwrap();
        sim.run_ticks(7, &mut NoopObserver).unwrap();
        assert_eq!(sim.history.len(), 7);
        let latest = sim.history.latest().unwrap();
        assert_eq!(latest.tick, Tick(6));
        assert_eq!(latest.counts, sim.counts());
        let peak = sim.history.peak_sick().unwrap();
        assert_eq!(Some(peak.counts.sick), sim.history.sick_series().max());
    }

    #[test]
    fn contained_run_stops_immediately_without_sick() {
        let config = SimulationConfig { initial_sick_agents: 0, ..small_config() };
        let mut sim = SimulationBuilder::new(config).build().unwrap();
        let mut rec = Recorder::default();
        let ran = sim.run_until_contained(100, &mut rec).unwrap();
        assert_eq!(ran, 0);
        assert_eq!(rec.ended, Some((Tick::ZERO, sim.counts())));
    }

    #[test]
    fn contained_run_respects_cap() {
        let config = SimulationConfig { initial_sick_agents: 20, ..SimulationConfig::default() };
        let mut sim = SimulationBuilder::new(config).seed(12).build().unwrap();
        let ran = sim.run_until_contained(10, &mut NoopObserver).unwrap();
        assert!(ran <= 10);
        assert_eq!(sim.tick(), Tick(ran));
        assert!(ran == 10 || sim.is_contained());
    }

    #[test]
    fn snapshot_reports_current_tick() {
        let mut sim = SimulationBuilder::new(small_config()).seed(13).build().unwrap();
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        let snap = sim.snapshot();
        assert_eq!(snap.tick, Tick(3));
        assert_eq!(snap.nodes.len(), 12);
        assert_eq!(snap.edges.len(), 6);
    }
}

// ── Restart ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod restart_tests {
    use super::*;
    use crate::{NoopObserver, SimError, SimulationBuilder};

    #[test]
    fn restart_resets_tick_and_counts() {
        let mut sim = SimulationBuilder::new(SimulationConfig::default()).seed(14).build().unwrap();
        sim.toggle_lock("temple-0").unwrap();
        sim.run_ticks(25, &mut NoopObserver).unwrap();

        let mut rec = Recorder::default();
        sim.restart(small_config(), &mut rec).unwrap();

        assert_eq!(sim.tick(), Tick::ZERO);
        assert_eq!(sim.graph.venue_count(), 6);
        assert_eq!(sim.graph.agent_count(), 6);
        assert_eq!(sim.counts().sick, 1);
        assert!(sim.history.is_empty());
        assert_eq!(rec.restarts, 1);
        assert!(sim.graph.lock_flags().iter().all(|&l| !l));
    }

    #[test]
    fn failed_restart_keeps_current_run() {
        let mut sim = SimulationBuilder::new(small_config()).seed(15).build().unwrap();
        sim.run_ticks(4, &mut NoopObserver).unwrap();
        let bad = SimulationConfig { house_count: u32::MAX, agents_per_house: 2, ..small_config() };
        assert!(matches!(sim.restart(bad, &mut NoopObserver), Err(SimError::Core(_))));
        assert_eq!(sim.tick(), Tick(4));
        assert_eq!(sim.graph.agent_count(), 6);
    }

    #[test]
    fn restart_reindexes_selector() {
        let mut sim = SimulationBuilder::new(small_config()).seed(16).build().unwrap();
        let bigger = SimulationConfig { supermarket_count: 5, ..small_config() };
        sim.restart(bigger, &mut NoopObserver).unwrap();
        assert_eq!(sim.selector.len(cg_core::VenueType::Supermarket), 5);
        sim.run_ticks(20, &mut NoopObserver).unwrap();
        assert!(sim.graph.is_consistent());
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use cg_disease::UpdateMode;
    use cg_graph::LinearVenueSelector;

    use super::*;
    use crate::{NoopObserver, SimulationBuilder};

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut sim = SimulationBuilder::new(SimulationConfig::default()).seed(17).build().unwrap();
            sim.run_ticks(100, &mut NoopObserver).unwrap();
            (sim.history.clone(), sim.snapshot())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn selectors_give_identical_runs() {
        let config = SimulationConfig { supermarket_count: 6, hospital_count: 3, ..SimulationConfig::default() };
        let mut indexed = SimulationBuilder::new(config.clone()).seed(18).build().unwrap();
        let mut linear = SimulationBuilder::new(config)
            .seed(18)
            .build_with_selector(LinearVenueSelector)
            .unwrap();
        indexed.run_ticks(100, &mut NoopObserver).unwrap();
        linear.run_ticks(100, &mut NoopObserver).unwrap();
        assert_eq!(indexed.history, linear.history);
        assert_eq!(indexed.snapshot(), linear.snapshot());
    }

    #[test]
    fn snapshot_mode_conserves_population() {
        let mut sim = SimulationBuilder::new(SimulationConfig::default())
            .seed(19)
            .update_mode(UpdateMode::Snapshot)
            .build()
            .unwrap();
        for _ in 0..100 {
            let report = sim.step().unwrap();
            assert_eq!(report.counts.total(), 378);
        }
    }
}
