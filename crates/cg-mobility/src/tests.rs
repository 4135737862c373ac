//! Unit tests for cg-mobility.

#[cfg(test)]
mod helpers {
    use cg_core::{SimRng, SimulationConfig};
    use cg_graph::{Graph, GraphBuilder};

    pub fn town(config: SimulationConfig) -> Graph {
        GraphBuilder::new(config).build(&mut SimRng::new(21)).unwrap()
    }

    /// Two houses of two, one of everything else, nobody sick.
    pub fn small_config() -> SimulationConfig {
        SimulationConfig {
            house_count:         2,
            agents_per_house:    2,
            bus_station_count:   1,
            hospital_count:      1,
            supermarket_count:   1,
            temple_count:        1,
            initial_sick_agents: 0,
        }
    }
}

// ── Location model ────────────────────────────────────────────────────────────

#[cfg(test)]
mod location {
    use cg_core::{SimRng, VenueType};

    use crate::{LocationModel, Outcome, VenueTransitions};

    #[test]
    fn standard_tables_build() {
        let t = VenueTransitions::standard().unwrap();
        for venue_type in VenueType::ALL {
            let sum: f64 = t.table(venue_type).entries().iter().map(|(p, _)| p).sum();
            assert!((sum - 1.0).abs() < 1e-12, "{venue_type} sums to {sum}");
        }
        let station: Vec<Outcome> = t.table(VenueType::Station).outcomes().collect();
        assert_eq!(
            station,
            [Outcome::Go(VenueType::Supermarket), Outcome::Base, Outcome::Go(VenueType::Temple)]
        );
    }

    #[test]
    fn certain_home_stay() {
        let model = LocationModel::standard().unwrap().home_stay_probability(1.0);
        let mut rng = SimRng::new(1);
        for _ in 0..1_000 {
            assert_eq!(model.next_outcome(VenueType::House, &mut rng), Outcome::Stay);
        }
    }

    #[test]
    fn stay_rule_is_residential_only() {
        let model = LocationModel::standard().unwrap().home_stay_probability(1.0);
        let mut rng = SimRng::new(2);
        for _ in 0..1_000 {
            assert_ne!(model.next_outcome(VenueType::Temple, &mut rng), Outcome::Stay);
        }
    }

    #[test]
    fn outcomes_come_from_the_table() {
        let model = LocationModel::standard().unwrap();
        let mut rng = SimRng::new(3);
        for venue_type in VenueType::ALL {
            let table = model.transitions.table(venue_type);
            for _ in 0..500 {
                let o = model.next_outcome(venue_type, &mut rng);
                assert!(o == Outcome::Stay || table.outcomes().any(|listed| listed == o));
            }
        }
    }

    #[test]
    fn replaced_table_is_used() {
        let mut transitions = VenueTransitions::standard().unwrap();
        transitions.set_table(VenueType::Temple, cg_core::TransitionTable::certain(Outcome::Base));
        let model = LocationModel::new(transitions);
        let mut rng = SimRng::new(6);
        for _ in 0..200 {
            assert_eq!(model.next_outcome(VenueType::Temple, &mut rng), Outcome::Base);
        }
        assert_ne!(
            model.transitions.table(VenueType::Station),
            model.transitions.table(VenueType::Temple)
        );
    }

    #[test]
    fn house_stays_about_ninety_percent() {
        let model = LocationModel::standard().unwrap();
        let mut rng = SimRng::new(4);
        let n = 20_000;
        let stays = (0..n)
            .filter(|_| model.next_outcome(VenueType::House, &mut rng) == Outcome::Stay)
            .count();
        let frac = stays as f64 / n as f64;
        assert!((0.88..0.92).contains(&frac), "stay fraction {frac}");
    }

    #[test]
    fn hospital_readmits_about_a_quarter() {
        let model = LocationModel::standard().unwrap();
        let mut rng = SimRng::new(5);
        let n = 20_000;
        let again = (0..n)
            .filter(|_| {
                model.next_outcome(VenueType::Hospital, &mut rng) == Outcome::Go(VenueType::Hospital)
            })
            .count();
        let frac = again as f64 / n as f64;
        assert!((0.23..0.27).contains(&frac), "hospital fraction {frac}");
    }

    #[test]
    fn display() {
        assert_eq!(Outcome::Go(VenueType::Station).to_string(), "station");
        assert_eq!(Outcome::Base.to_string(), "base");
    }
}

// ── Mover ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod mover {
    use cg_core::{HealthState, SimulationConfig, VenueType};
    use cg_graph::LinearVenueSelector;

    use crate::{LockSnapshot, MobilityError, MoveOutcome, Mover, Outcome};

    use super::helpers::{small_config, town};

    #[test]
    fn redundant_outcomes_stay() {
        let mut g = town(small_config());
        let locks = LockSnapshot::capture(&g);
        let mover = Mover::new(&locks, &LinearVenueSelector);
        let agent = g.agent_by_label("house-0-0").unwrap();

        for outcome in [Outcome::Stay, Outcome::Base, Outcome::Go(VenueType::House)] {
            assert_eq!(mover.move_agent(&mut g, agent, outcome), Ok(MoveOutcome::Stayed));
        }
        assert_eq!(g.location(agent), g.agent(agent).base);
    }

    #[test]
    fn go_moves_to_venue_of_type() {
        let mut g = town(small_config());
        let locks = LockSnapshot::capture(&g);
        let mover = Mover::new(&locks, &LinearVenueSelector);
        let agent = g.agent_by_label("house-1-1").unwrap();
        let home = g.location(agent);
        let shop = g.venue_by_label("supermarket-0").unwrap();

        let result = mover.move_agent(&mut g, agent, Outcome::Go(VenueType::Supermarket));
        assert_eq!(result, Ok(MoveOutcome::Moved { from: home, to: shop }));
        assert_eq!(g.location(agent), shop);
        assert!(g.is_consistent());

        let back = mover.move_agent(&mut g, agent, Outcome::Base);
        assert_eq!(back, Ok(MoveOutcome::Moved { from: shop, to: home }));
    }

    #[test]
    fn dead_agents_do_not_move() {
        let mut g = town(small_config());
        let agent = g.agent_by_label("house-0-1").unwrap();
        g.set_health(agent, HealthState::Dead);
        let locks = LockSnapshot::capture(&g);
        let mover = Mover::new(&locks, &LinearVenueSelector);

        let result = mover.move_agent(&mut g, agent, Outcome::Go(VenueType::Hospital));
        assert_eq!(result, Ok(MoveOutcome::Stayed));
        assert_eq!(g.location(agent), g.agent(agent).base);
    }

    #[test]
    fn locked_source_blocks() {
        let mut g = town(small_config());
        g.set_locked_by_label("house-0", true).unwrap();
        let locks = LockSnapshot::capture(&g);
        let mover = Mover::new(&locks, &LinearVenueSelector);
        let agent = g.agent_by_label("house-0-0").unwrap();
        let home = g.location(agent);

        let result = mover.move_agent(&mut g, agent, Outcome::Go(VenueType::Temple));
        assert!(matches!(result, Ok(MoveOutcome::Blocked { from, .. }) if from == home));
        assert_eq!(g.location(agent), home);
    }

    #[test]
    fn locked_destination_blocks() {
        let mut g = town(small_config());
        g.set_locked_by_label("station-0", true).unwrap();
        let locks = LockSnapshot::capture(&g);
        let mover = Mover::new(&locks, &LinearVenueSelector);
        let agent = g.agent_by_label("house-1-0").unwrap();
        let station = g.venue_by_label("station-0").unwrap();

        let result = mover.move_agent(&mut g, agent, Outcome::Go(VenueType::Station));
        assert!(matches!(result, Ok(MoveOutcome::Blocked { to, .. }) if to == station));
        assert!(g.occupants(station).is_empty());
    }

    #[test]
    fn snapshot_ignores_later_toggles() {
        let mut g = town(small_config());
        let locks = LockSnapshot::capture(&g);
        g.toggle_lock("temple-0").unwrap();
        assert_eq!(locks.locked_count(), 0);

        let mover = Mover::new(&locks, &LinearVenueSelector);
        let agent = g.agent_by_label("house-0-0").unwrap();
        let result = mover.move_agent(&mut g, agent, Outcome::Go(VenueType::Temple));
        assert!(matches!(result, Ok(MoveOutcome::Moved { .. })));
    }

    #[test]
    fn missing_venue_type_is_no_candidate() {
        let config = SimulationConfig { hospital_count: 0, ..small_config() };
        let mut g = town(config);
        let locks = LockSnapshot::capture(&g);
        let mover = Mover::new(&locks, &LinearVenueSelector);
        let agent = g.agent_by_label("house-0-0").unwrap();

        let result = mover.move_agent(&mut g, agent, Outcome::Go(VenueType::Hospital));
        assert_eq!(result, Err(MobilityError::NoCandidate(VenueType::Hospital)));
        assert_eq!(g.location(agent), g.agent(agent).base);
    }
}
