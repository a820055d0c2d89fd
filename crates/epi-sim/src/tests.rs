//! Unit and end-to-end tests for epi-sim.

use chrono::{NaiveDate, NaiveDateTime};

use epi_behavior::MeasureBehavior;
use epi_core::SimConfig;
use epi_population::sample_table;
use epi_schedule::{MeasureRegime, MeasureTimetable, SectorTables};

use crate::{EpidemicParams, ReferenceData, Sim, SimBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A Monday.
fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 3, 2)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn config(n_days: u32) -> SimConfig {
    SimConfig::new(start(), n_days, 42)
}

fn reference() -> ReferenceData {
    ReferenceData::new(sample_table(300, 7), SectorTables::default())
}

fn open_params(per_hour: f64, initial: usize, target: usize) -> EpidemicParams {
    let timetable = MeasureTimetable::constant(start().date(), MeasureRegime::all_open("open"));
    let mut params = EpidemicParams::new(per_hour, initial, target, timetable);
    params.grid_width = 50;
    params.grid_height = 50;
    params
}

fn build<'a>(
    config: &'a SimConfig,
    reference: &'a ReferenceData,
    params: &'a EpidemicParams,
    behavior: &'a MeasureBehavior,
) -> Sim<'a, MeasureBehavior> {
    SimBuilder::new(config, reference, params, behavior)
        .build()
        .unwrap()
}

// ── Parameter validation ──────────────────────────────────────────────────────

#[cfg(test)]
mod params_tests {
    use epi_core::LocationKind;
    use epi_schedule::ScheduleError;

    use super::*;
    use crate::{SimError, TransmissionTable};

    fn build_err(params: &EpidemicParams) -> SimError {
        let (config, reference, behavior) = (config(5), reference(), MeasureBehavior::default());
        match SimBuilder::new(&config, &reference, params, &behavior).build() {
            Ok(_) => panic!("build should have failed"),
            Err(e) => e,
        }
    }

    #[test]
    fn probability_out_of_range_rejected() {
        assert!(matches!(build_err(&open_params(1.5, 0, 100)), SimError::InvalidParams(_)));
        assert!(matches!(build_err(&open_params(f64::NAN, 0, 100)), SimError::InvalidParams(_)));
        let mut params = open_params(0.1, 0, 100);
        params.transmission = TransmissionTable::new(0.1).with_override(LocationKind::School, -0.1);
        assert!(matches!(build_err(&params), SimError::InvalidParams(_)));
    }

    #[test]
    fn too_many_initial_infections_rejected() {
        assert!(matches!(
            build_err(&open_params(0.1, 101, 100)),
            SimError::TooManyInitialInfections { initial: 101, population: 100 }
        ));
    }

    #[test]
    fn negative_random_rate_rejected() {
        let mut params = open_params(0.1, 0, 100);
        params.random_infection_rate = -1.0;
        assert!(matches!(build_err(&params), SimError::InvalidParams(_)));
    }

    #[test]
    fn empty_timetable_rejected() {
        let mut params = open_params(0.1, 0, 100);
        params.timetable = MeasureTimetable::new();
        assert!(matches!(
            build_err(&params),
            SimError::Schedule(ScheduleError::EmptyTimetable)
        ));
    }

    #[test]
    fn timetable_starting_late_rejected() {
        let mut params = open_params(0.1, 0, 100);
        let late = start().date().succ_opt().unwrap();
        params.timetable = MeasureTimetable::constant(late, MeasureRegime::all_open("late"));
        assert!(matches!(
            build_err(&params),
            SimError::Schedule(ScheduleError::StartsTooLate { .. })
        ));
    }

    #[test]
    fn grid_without_room_for_homes_rejected() {
        let mut params = open_params(0.1, 0, 100);
        params.grid_width = 2;
        params.grid_height = 2;
        assert!(matches!(build_err(&params), SimError::World(_)));
    }

    #[test]
    fn transmission_per_tick_divides_by_ticks_per_hour() {
        let table = TransmissionTable::new(0.06).with_override(LocationKind::Home, 0.2);
        assert_eq!(table.per_tick(LocationKind::School, 1), 0.06);
        assert!((table.per_tick(LocationKind::School, 2) - 0.03).abs() < 1e-12);
        assert_eq!(table.per_tick(LocationKind::Home, 1), 0.2);
        assert_eq!(table.per_hour(LocationKind::Workplace(3)), 0.06);
    }

    #[test]
    fn delays_default_to_one_day() {
        let (config, params) = (config(5), open_params(0.1, 0, 100));
        assert_eq!(params.stay_home_delay(&config), 18);
        assert_eq!(params.quarantine_delay(&config), 18);
        assert_eq!(params.quarantine_window(&config), 14 * 18);
    }
}

// ── World construction and assignment ─────────────────────────────────────────

#[cfg(test)]
mod assignment_tests {
    use std::collections::{BTreeMap, BTreeSet};

    use epi_core::LocationKind;

    use super::*;
    use crate::FacilityCounts;

    #[test]
    fn facility_counts_floor_at_one() {
        let (config, reference, behavior) = (config(1), reference(), MeasureBehavior::default());
        let params = open_params(0.0, 0, 20);
        let sim = build(&config, &reference, &params, &behavior);
        let counts = FacilityCounts::derive(&sim.world.agents, &reference.capacity, &reference.settings);
        assert_eq!(counts.schools, 1);
        assert_eq!(counts.universities, 1);
        assert_eq!(counts.supermarkets, 1);
        assert!(counts.kindergartens >= 1);
        assert!(!counts.workplace_sections.is_empty());
    }

    #[test]
    fn every_agent_is_fully_assigned() {
        let (config, reference, behavior) = (config(1), reference(), MeasureBehavior::default());
        let params = open_params(0.0, 0, 500);
        let sim = build(&config, &reference, &params, &behavior);
        let grid = &sim.world.grid;
        let settings = &reference.settings;

        for a in sim.world.agents.iter() {
            assert_eq!(a.position, a.locations.home);
            assert_eq!(grid.kind(a.locations.home), LocationKind::Home);
            assert!(grid.occupants(a.position).contains(&a.id));
            assert_eq!(a.locations.supermarkets.len(), 2);
            assert!(a.locations.supermarkets.iter().all(|&c| grid.kind(c) == LocationKind::Supermarket));

            assert_eq!(a.locations.school.is_some(), settings.is_school_age(a.age()));
            if let Some(school) = a.locations.school {
                assert_eq!(grid.kind(school), LocationKind::School);
                assert!(a.groups.school < grid.cell(school).n_groups);
            }
            assert_eq!(a.locations.kindergarten.is_some(), settings.is_kindergarten_age(a.age()));
            assert_eq!(a.locations.university.is_some(), a.demographics.student);
            assert_eq!(a.locations.workplace.is_some(), a.demographics.is_worker());
            if let Some(workplace) = a.locations.workplace {
                let section = a.demographics.sector.section();
                assert_eq!(grid.kind(workplace), LocationKind::Workplace(section));
                assert!(a.groups.workplace < grid.cell(workplace).n_groups);
            }
        }
    }

    #[test]
    fn households_share_home_and_flat() {
        let (config, reference, behavior) = (config(1), reference(), MeasureBehavior::default());
        let params = open_params(0.0, 0, 300);
        let sim = build(&config, &reference, &params, &behavior);
        let agents = &sim.world.agents;
        for (_, members) in agents.households() {
            let first = agents.get(members[0]);
            for &m in members {
                assert_eq!(agents.get(m).locations.home, first.locations.home);
                assert_eq!(agents.get(m).groups.home, first.groups.home);
            }
        }
    }

    #[test]
    fn crowded_grid_packs_households_into_flats() {
        let (config, reference, behavior) = (config(1), reference(), MeasureBehavior::default());
        let mut params = open_params(0.0, 0, 120);
        params.grid_width = 6;
        params.grid_height = 6;
        let sim = build(&config, &reference, &params, &behavior);
        let agents = &sim.world.agents;
        let homes = sim.world.grid.cells_of_kind(LocationKind::Home);
        assert!(agents.household_count() > homes.len());

        // Every household has a distinct (home, flat) pair.
        let mut flats: BTreeMap<_, BTreeSet<u32>> = BTreeMap::new();
        for (_, members) in agents.households() {
            let a = agents.get(members[0]);
            assert!(flats.entry(a.locations.home).or_default().insert(a.groups.home));
        }
        let total_flats: u32 = homes.iter().map(|&h| sim.world.grid.cell(h).n_groups).sum();
        assert_eq!(total_flats as usize, agents.household_count());
        assert!(homes.iter().all(|&h| sim.world.grid.cell(h).n_groups >= 1));
    }

    #[test]
    fn initial_infections_seeded_and_counted() {
        let (config, reference, behavior) = (config(1), reference(), MeasureBehavior::default());
        let params = open_params(0.0, 25, 300);
        let sim = build(&config, &reference, &params, &behavior);
        let seeded = sim
            .world
            .agents
            .iter()
            .filter(|a| a.infection == epi_agent::InfectionState::Presymptomatic)
            .count();
        assert_eq!(seeded, 25);
        assert_eq!(sim.cases().cumulative_cases, 25);
        assert!(sim.world.agents.iter().all(|a| a.durations.exposed > 0.0 && a.durations.mild > 0.0));
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod record_tests {
    use epi_core::Tick;

    use super::start;
    use crate::{CaseCounter, ReplicationOutput};

    #[test]
    fn counter_tracks_brackets_and_resets_daily() {
        let mut c = CaseCounter::default();
        for age in [3, 29, 30, 59, 60, 90] {
            c.count(age);
        }
        assert_eq!((c.age_0_29, c.age_30_59, c.age_60_plus), (2, 2, 2));
        let r = c.snapshot(1, Tick(17), start(), 1_000);
        assert_eq!((r.new_cases, r.cumulative_cases), (6, 6));
        assert_eq!(r.new_cases_age, 271);
        assert_eq!(r.scale_to_100k, 100.0);
        assert_eq!(r.cumulative_per_100k(), 600.0);

        c.count(40);
        let r = c.snapshot(2, Tick(35), start(), 1_000);
        assert_eq!((r.new_cases, r.cumulative_cases), (1, 7));
        assert_eq!((r.new_cases_age, r.cumulative_cases_age), (40, 311));
    }

    #[test]
    fn adjusted_series_anchors_day_zero() {
        let mut c = CaseCounter::default();
        let mut records = Vec::new();
        for day in 0..3 {
            c.count(50);
            records.push(c.snapshot(day, Tick(u64::from(day) * 18), start(), 200));
        }
        let out = ReplicationOutput {
            seed: 1,
            population: 200,
            records,
            infected_ages: vec![50; 3],
        };
        assert_eq!(out.cumulative_per_100k(), vec![500.0, 1_000.0, 1_500.0]);
        assert_eq!(out.adjusted_per_100k(Some(40.0)), vec![40.0, 540.0, 1_040.0]);
        assert_eq!(out.adjusted_per_100k(None), out.cumulative_per_100k());
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use epi_agent::{AgentStore, InfectionState};
    use epi_core::Tick;
    use epi_schedule::QuarantinePolicy;

    use super::*;
    use crate::{DailyRecord, NoopObserver, SimObserver, run_replication};

    #[derive(Default)]
    struct Counting {
        starts: u64,
        ends: u64,
        days: Vec<u32>,
        finished: bool,
    }

    impl SimObserver for Counting {
        fn on_tick_start(&mut self, _t: Tick) { self.starts += 1; }
        fn on_tick_end(&mut self, _t: Tick, _u: usize) { self.ends += 1; }
        fn on_day(&mut self, r: &DailyRecord, _a: &AgentStore) { self.days.push(r.day); }
        fn on_sim_end(&mut self, _t: Tick) { self.finished = true; }
    }

    fn cumulative(records: &[DailyRecord]) -> Vec<u64> {
        records.iter().map(|r| r.cumulative_cases).collect()
    }

    #[test]
    fn one_record_per_day() {
        let (config, reference, behavior) = (config(10), reference(), MeasureBehavior::default());
        let params = open_params(0.05, 5, 200);
        let mut sim = build(&config, &reference, &params, &behavior);
        let mut obs = Counting::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(obs.starts, config.total_ticks());
        assert_eq!(obs.ends, config.total_ticks());
        assert_eq!(obs.days, (0..10).collect::<Vec<_>>());
        assert!(obs.finished);

        let records = sim.records();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].tick, Tick(0));
        assert_eq!(records[0].datetime, start());
        assert_eq!(records[1].tick, Tick(17));
        for (d, r) in records.iter().enumerate() {
            assert_eq!(r.day as usize, d);
            assert_eq!(r.datetime.date(), start().date() + chrono::Days::new(d as u64));
        }
    }

    #[test]
    fn zero_transmission_keeps_seed_count() {
        let (config, reference, behavior) = (config(100), reference(), MeasureBehavior::default());
        let params = open_params(0.0, 50, 1_000);
        let out = run_replication(&config, &reference, &params, &behavior, 11).unwrap();
        assert_eq!(out.records.len(), 100);
        assert!(out.records.iter().all(|r| r.cumulative_cases == 50));
        assert_eq!(out.records[0].new_cases, 50);
        assert!(out.records[1..].iter().all(|r| r.new_cases == 0));
        assert_eq!(out.infected_ages.len(), 50);
    }

    #[test]
    fn no_seeds_and_no_random_infections_stay_clean() {
        let (config, reference, behavior) = (config(30), reference(), MeasureBehavior::default());
        let params = open_params(0.5, 0, 300);
        let mut sim = build(&config, &reference, &params, &behavior);
        sim.run(&mut NoopObserver).unwrap();
        assert!(!sim.is_simulating());
        assert!(sim.records().iter().all(|r| r.cumulative_cases == 0));
        assert!(sim.into_output().infected_ages.is_empty());
    }

    #[test]
    fn random_infections_keep_the_loop_alive() {
        let (config, reference, behavior) = (config(8), reference(), MeasureBehavior::default());
        let mut params = open_params(0.0, 0, 300);
        params.random_infection_rate = 3.0;
        let mut sim = build(&config, &reference, &params, &behavior);
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.is_simulating());
        let exposed = sim
            .world
            .agents
            .iter()
            .filter(|a| a.infection != InfectionState::Susceptible)
            .count();
        // Three draws on each of 7 new days, minus repeats.
        assert!((1..=21).contains(&exposed), "{exposed}");
        assert!(sim
            .world
            .agents
            .iter()
            .filter(|a| a.infection != InfectionState::Susceptible)
            .all(|a| a.cell_of_infection.is_some()));
    }

    #[test]
    fn open_scenario_grows_then_stays_monotone() {
        let (config, reference, behavior) = (config(100), reference(), MeasureBehavior::default());
        let params = open_params(0.06, 50, 1_000);
        let out = run_replication(&config, &reference, &params, &behavior, 5).unwrap();
        let series = cumulative(&out.records);
        assert_eq!(series.len(), 100);
        assert_eq!(series[0], 50);
        assert!(series.windows(2).all(|w| w[0] <= w[1]));
        assert!(series[99] > 50);
        assert!(series[14] > series[0]);
        assert!(out.population >= 1_000);
        assert!(out.infected_ages.len() as u64 >= series[99]);
    }

    #[test]
    fn same_seed_same_output() {
        let (config, reference, behavior) = (config(20), reference(), MeasureBehavior::default());
        let params = open_params(0.1, 10, 300);
        let a = run_replication(&config, &reference, &params, &behavior, 3).unwrap();
        let b = run_replication(&config, &reference, &params, &behavior, 3).unwrap();
        assert_eq!(a, b);
        let c = run_replication(&config, &reference, &params, &behavior, 4).unwrap();
        assert_ne!(a.infected_ages, c.infected_ages);
    }

    #[test]
    fn states_follow_the_state_graph() {
        use InfectionState::*;
        let (config, reference, behavior) = (config(25), reference(), MeasureBehavior::default());
        let params = open_params(0.2, 10, 300);
        let mut sim = build(&config, &reference, &params, &behavior);
        let mut before: Vec<InfectionState> = sim.world.agents.iter().map(|a| a.infection).collect();

        for _ in 0..config.total_ticks() {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            for (a, &prev) in sim.world.agents.iter().zip(&before) {
                let ok = matches!(
                    (prev, a.infection),
                    (Susceptible, Exposed)
                        | (Exposed, Presymptomatic)
                        | (Presymptomatic, Mild | Asymptomatic)
                        | (Mild | Asymptomatic, Recovered)
                ) || prev == a.infection;
                assert!(ok, "{}: {prev:?} -> {:?}", a.id, a.infection);
            }
            before = sim.world.agents.iter().map(|a| a.infection).collect();
        }
        assert!(before.iter().any(|&s| s == Recovered));
    }

    #[test]
    fn household_quarantine_holds_for_the_window() {
        let (config, reference, behavior) = (config(12), reference(), MeasureBehavior::default());
        let mut regime = MeasureRegime::all_open("household quarantine");
        regime.quarantine = QuarantinePolicy::Household;
        let mut params = open_params(0.2, 30, 300);
        params.timetable = MeasureTimetable::constant(start().date(), regime);
        params.quarantine_days = 2;
        let window = params.quarantine_window(&config);
        let mut sim = build(&config, &reference, &params, &behavior);

        let (mut quarantined, mut lifted) = (0, 0);
        while sim.clock.current_tick < config.end_tick() {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            let now = sim.clock.current_tick.0 - 1;
            for a in sim.world.agents.iter() {
                let Some(q) = a.quarantined_at else { continue };
                let since = now - q.0;
                if since < window {
                    assert!(a.quarantined && a.stay_at_home, "{} at {now}", a.id);
                    quarantined += 1;
                } else if since == window {
                    assert!(!a.quarantined && !a.stay_at_home, "{} at {now}", a.id);
                    lifted += 1;
                }
            }
        }
        assert!(quarantined > 0);
        assert!(lifted > 0);
    }

    #[test]
    fn transmission_stays_within_the_group() {
        use epi_core::{AgentId, LocationKind};

        use crate::sim::transmit;

        let (config, reference, behavior) = (config(5), reference(), MeasureBehavior::default());
        let params = open_params(1.0, 0, 300);
        let mut sim = build(&config, &reference, &params, &behavior);
        let school = sim.world.grid.cells_of_kind(LocationKind::School)[0];
        let [source, other_class, mate_a, mate_b] = [AgentId(0), AgentId(1), AgentId(2), AgentId(3)];

        for (id, class) in [(source, 0), (other_class, 1)] {
            sim.world.relocate(id, school);
            sim.world.agents.get_mut(id).groups.school = class;
        }
        assert!(sim.world.agents.get_mut(source).seed_infectious(Tick(0)));

        let attempt = |sim: &mut Sim<'_, MeasureBehavior>| {
            transmit(
                &mut sim.world,
                source,
                Tick(1),
                &params.transmission,
                config.ticks_per_hour,
                &mut sim.rng,
                &mut sim.candidates,
            )
        };
        for _ in 0..20 {
            attempt(&mut sim);
        }
        let state = |sim: &Sim<'_, MeasureBehavior>, id| sim.world.agents.get(id).infection;
        assert_eq!(state(&sim, other_class), InfectionState::Susceptible);

        // Two classmates join: one attempt exposes exactly one of them.
        for id in [mate_a, mate_b] {
            sim.world.relocate(id, school);
            sim.world.agents.get_mut(id).groups.school = 0;
        }
        attempt(&mut sim);
        let exposed = [mate_a, mate_b]
            .into_iter()
            .filter(|&id| state(&sim, id) == InfectionState::Exposed)
            .count();
        assert_eq!(exposed, 1);
        assert_eq!(state(&sim, other_class), InfectionState::Susceptible);
        assert_eq!(
            sim.world.agents.iter().filter(|a| a.infection == InfectionState::Exposed).count(),
            1
        );
    }

    #[test]
    fn quarantine_lifts_after_the_epidemic_dies_out() {
        let (config, reference, behavior) = (config(45), reference(), MeasureBehavior::default());
        let mut regime = MeasureRegime::all_open("household quarantine");
        regime.quarantine = QuarantinePolicy::Household;
        let mut params = open_params(0.0, 30, 300);
        params.timetable = MeasureTimetable::constant(start().date(), regime);
        params.quarantine_days = 30;
        let window = params.quarantine_window(&config);
        let mut sim = build(&config, &reference, &params, &behavior);

        let mut held_after_extinction = 0;
        while sim.clock.current_tick < config.end_tick() {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            if sim.is_simulating() {
                continue;
            }
            let now = sim.clock.current_tick.0 - 1;
            for a in sim.world.agents.iter() {
                let Some(q) = a.quarantined_at else { continue };
                if now - q.0 < window {
                    assert!(a.quarantined && a.stay_at_home, "{} at {now}", a.id);
                    held_after_extinction += 1;
                }
            }
        }
        assert!(!sim.is_simulating());
        assert!(held_after_extinction > 0);
        for a in sim.world.agents.iter() {
            assert!(!a.quarantined && !a.stay_at_home, "{} still held", a.id);
        }
    }

    #[test]
    fn regime_follows_the_timetable() {
        let config = config(6);
        let (reference, behavior) = (reference(), MeasureBehavior::default());
        let mut params = open_params(0.0, 0, 100);
        let mut closed = MeasureRegime::all_open("schools closed");
        closed.school = 0.0;
        params
            .timetable
            .insert(start().date() + chrono::Days::new(3), closed);
        let mut sim = build(&config, &reference, &params, &behavior);
        sim.run_ticks(2 * config.ticks_per_day(), &mut NoopObserver).unwrap();
        assert_eq!(sim.regime().name, "open");
        sim.run_ticks(config.ticks_per_day(), &mut NoopObserver).unwrap();
        assert_eq!(sim.regime().name, "schools closed");
    }

    #[test]
    fn workers_commute_on_workdays() {
        let (config, reference, behavior) = (config(2), reference(), MeasureBehavior::default());
        let params = open_params(0.0, 0, 300);
        let mut sim = build(&config, &reference, &params, &behavior);
        // Tick 1 is 08:00 on a Monday.
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        let at_work = sim
            .world
            .agents
            .iter()
            .filter(|a| a.locations.workplace == Some(a.position))
            .count();
        assert!(at_work > 0);
        for a in sim.world.agents.iter() {
            assert!(sim.world.grid.occupants(a.position).contains(&a.id));
        }
        let total: usize = sim.world.grid.cells().map(|(_, c)| c.occupants.len()).sum();
        assert_eq!(total, sim.world.population());
    }

    #[test]
    fn day_starts_at_the_reference_hour() {
        let (config, mut reference, behavior) = (config(2), reference(), MeasureBehavior::default());
        reference.settings.start_of_day_hour = 10;
        let params = open_params(0.0, 0, 300);
        let mut sim = build(&config, &reference, &params, &behavior);
        let at_work = |sim: &Sim<'_, MeasureBehavior>| {
            sim.world
                .agents
                .iter()
                .filter(|a| a.locations.workplace == Some(a.position))
                .count()
        };
        // 08:00, then 10:00.
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert_eq!(at_work(&sim), 0);
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert!(at_work(&sim) > 0);
    }
}
