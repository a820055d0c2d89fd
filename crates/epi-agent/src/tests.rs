//! Unit tests for epi-agent.

#[cfg(test)]
fn person(age: u8) -> crate::Demographics {
    crate::Demographics {
        person_id: 1,
        source_household: 1,
        age,
        gender: crate::Gender::Female,
        sector: epi_core::Sector::from_division(47).unwrap(),
        work_hours: 8.0,
        shopping_hours: 1.0,
        student: false,
    }
}

#[cfg(test)]
fn with_durations(mut agent: crate::Agent) -> crate::Agent {
    agent.durations = crate::StageDurations {
        exposed: 10.0,
        presymptomatic: 5.0,
        asymptomatic: 20.0,
        mild: 20.0,
    };
    agent
}

#[cfg(test)]
mod infection {
    use epi_core::{CellId, SimRng, Tick};

    use super::{person, with_durations};
    use crate::{Agent, InfectionState, Transition, symptomatic_probability};

    #[test]
    fn symptomatic_probability_by_decade() {
        assert_eq!(symptomatic_probability(0), 0.50);
        assert_eq!(symptomatic_probability(35), 0.65);
        assert_eq!(symptomatic_probability(79), 0.85);
        assert_eq!(symptomatic_probability(80), 0.90);
        assert_eq!(symptomatic_probability(104), 0.90);
    }

    #[test]
    fn expose_only_susceptible() {
        let mut a = Agent::new(person(30));
        assert!(a.expose(Tick(3), Some(CellId(5))));
        assert_eq!(a.infection, InfectionState::Exposed);
        assert_eq!(a.cell_of_infection, Some(CellId(5)));
        assert!(!a.expose(Tick(4), None));
        assert_eq!(a.exposed_at, Some(Tick(3)));
    }

    #[test]
    fn full_course_follows_state_graph() {
        let mut rng = SimRng::new(1);
        let mut a = with_durations(Agent::new(person(50)));
        a.expose(Tick(0), None);

        let mut seen = vec![a.infection];
        for t in 0..200 {
            if let Some(tr) = a.update_infection(Tick(t), &mut rng) {
                let next = a.infection;
                let prev = *seen.last().unwrap();
                let legal = matches!(
                    (prev, next),
                    (InfectionState::Exposed, InfectionState::Presymptomatic)
                        | (InfectionState::Presymptomatic, InfectionState::Mild)
                        | (InfectionState::Presymptomatic, InfectionState::Asymptomatic)
                        | (InfectionState::Mild, InfectionState::Recovered)
                        | (InfectionState::Asymptomatic, InfectionState::Recovered)
                );
                assert!(legal, "illegal {prev:?} -> {next:?} via {tr:?}");
                seen.push(next);
            }
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(a.infection, InfectionState::Recovered);
    }

    #[test]
    fn stage_boundaries() {
        let mut rng = SimRng::new(2);
        let mut a = with_durations(Agent::new(person(20)));
        a.expose(Tick(0), None);

        // Exposed -> presymptomatic once elapsed >= 10.
        assert_eq!(a.update_infection(Tick(9), &mut rng), None);
        assert_eq!(
            a.update_infection(Tick(10), &mut rng),
            Some(Transition::BecameInfectious)
        );
        assert_eq!(a.infectious_at, Some(Tick(10)));

        // Presymptomatic -> onset once elapsed > 5.
        assert_eq!(a.update_infection(Tick(15), &mut rng), None);
        assert!(matches!(
            a.update_infection(Tick(16), &mut rng),
            Some(Transition::Onset { .. })
        ));
        assert_eq!(a.onset_at, Some(Tick(16)));

        // Recovery once elapsed > 20.
        assert_eq!(a.update_infection(Tick(36), &mut rng), None);
        assert_eq!(
            a.update_infection(Tick(37), &mut rng),
            Some(Transition::Recovered)
        );
        assert_eq!(a.update_infection(Tick(500), &mut rng), None);
    }

    #[test]
    fn seeded_agent_is_already_a_case() {
        let mut a = Agent::new(person(40));
        assert!(a.seed_infectious(Tick(0)));
        assert_eq!(a.infection, InfectionState::Presymptomatic);
        assert!(!a.mark_case());
        assert!(a.infection.is_infectious());
    }

    #[test]
    fn mark_case_once() {
        let mut a = Agent::new(person(40));
        assert!(a.mark_case());
        assert!(!a.mark_case());
    }
}

#[cfg(test)]
mod duration {
    use epi_core::SimRng;

    use crate::{DurationParams, DurationSampler, MeanVariance};

    #[test]
    fn sample_mean_matches_parameters() {
        let sampler = DurationSampler::new(&DurationParams::default(), 18).unwrap();
        let mut rng = SimRng::new(123);
        let n = 20_000;
        let mean_exposed: f64 = (0..n)
            .map(|_| sampler.sample(&mut rng).exposed)
            .sum::<f64>()
            / n as f64;
        // 4.6 days at 18 ticks per day.
        assert!((mean_exposed - 4.6 * 18.0).abs() < 2.0, "got {mean_exposed}");
    }

    #[test]
    fn durations_are_positive() {
        let sampler = DurationSampler::new(&DurationParams::default(), 18).unwrap();
        let mut rng = SimRng::new(4);
        for _ in 0..1_000 {
            let d = sampler.sample(&mut rng);
            assert!(d.exposed > 0.0 && d.presymptomatic > 0.0);
            assert!(d.mild > 0.0 && d.asymptomatic > 0.0);
        }
    }

    #[test]
    fn invalid_parameters_rejected() {
        let params = DurationParams {
            mild: MeanVariance::new(0.0, 2.0),
            ..DurationParams::default()
        };
        assert!(DurationSampler::new(&params, 18).is_err());
    }
}

#[cfg(test)]
mod activity {
    use epi_core::{ActivityKind, CellId};

    use super::person;
    use crate::Agent;

    fn at_home() -> Agent {
        let mut a = Agent::new(person(30));
        a.locations.home = CellId(1);
        a.position = CellId(1);
        a
    }

    #[test]
    fn runs_for_duration_then_returns_home() {
        let mut a = at_home();
        assert!(a.initialize_activity(ActivityKind::AtWork, CellId(9), 2, false));
        assert_eq!(a.step_activity(), Some(CellId(9)));
        assert_eq!(a.step_activity(), None);
        assert_eq!(a.step_activity(), Some(CellId(1)));
        assert!(a.activity.is_none());
        assert_eq!(a.step_activity(), None);
        assert!(a.has_done_today(ActivityKind::AtWork));
    }

    #[test]
    fn overwrite_rules() {
        let mut a = at_home();
        a.initialize_activity(ActivityKind::Shopping, CellId(4), 3, false);
        assert!(!a.initialize_activity(ActivityKind::AtUniversity, CellId(5), 3, false));
        assert!(a.initialize_activity(ActivityKind::AtWork, CellId(6), 3, true));
        assert_eq!(a.activity.unwrap().kind, ActivityKind::AtWork);
    }

    #[test]
    fn daily_log_resets() {
        let mut a = at_home();
        a.initialize_activity(ActivityKind::Shopping, CellId(4), 1, false);
        a.start_new_day();
        assert!(!a.has_done_today(ActivityKind::Shopping));
    }
}

#[cfg(test)]
mod care {
    use epi_core::Tick;

    use super::person;
    use crate::{Agent, InfectionState};

    fn mild_since(onset: u64) -> Agent {
        let mut a = Agent::new(person(30));
        a.infection = InfectionState::Mild;
        a.onset_at = Some(Tick(onset));
        a
    }

    #[test]
    fn symptomatic_stays_home_after_delay() {
        let mut a = mild_since(10);
        a.decide_stay_home(Tick(20), 18);
        assert!(!a.stay_at_home);
        a.decide_stay_home(Tick(28), 18);
        assert!(a.stay_at_home);
        a.infection = InfectionState::Recovered;
        a.decide_stay_home(Tick(29), 18);
        assert!(!a.stay_at_home);
    }

    #[test]
    fn quarantine_lifts_after_window() {
        let mut a = Agent::new(person(30));
        a.quarantine(Tick(100));
        a.update_quarantine(Tick(100), 252);
        assert!(a.stay_at_home);
        a.update_quarantine(Tick(351), 252);
        assert!(a.stay_at_home && a.quarantined);
        a.update_quarantine(Tick(352), 252);
        assert!(!a.stay_at_home && !a.quarantined);
    }

    #[test]
    fn isolation_due_once() {
        let mut a = mild_since(0);
        assert!(!a.isolation_due(Tick(5), 10));
        assert!(a.isolation_due(Tick(10), 10));
        a.quarantine(Tick(10));
        assert!(!a.isolation_due(Tick(11), 10));
    }
}

#[cfg(test)]
mod store {
    use epi_core::{AgentId, HouseholdId, SimRng, Tick};

    use super::person;
    use crate::{Agent, AgentStore, InfectionState};

    fn store() -> AgentStore {
        let households = vec![
            vec![Agent::new(person(40)), Agent::new(person(38))],
            vec![Agent::new(person(70))],
            vec![
                Agent::new(person(30)),
                Agent::new(person(5)),
                Agent::new(person(2)),
            ],
        ];
        AgentStore::from_households(households).unwrap()
    }

    #[test]
    fn ids_and_households_assigned_in_order() {
        let s = store();
        assert_eq!(s.len(), 6);
        assert_eq!(s.household_count(), 3);
        assert_eq!(s.get(AgentId(3)).household, HouseholdId(2));
        assert_eq!(
            s.household(HouseholdId(2)),
            &[AgentId(3), AgentId(4), AgentId(5)]
        );
        assert!(s.iter().enumerate().all(|(i, a)| a.id.index() == i));
    }

    #[test]
    fn empty_household_rejected() {
        assert!(AgentStore::from_households(vec![vec![]]).is_err());
    }

    #[test]
    fn isolate_household_quarantines_every_member() {
        let mut s = store();
        s.isolate_household(AgentId(4), Tick(7));
        for id in [3, 4, 5] {
            let a = s.get(AgentId(id));
            assert!(a.quarantined && a.stay_at_home);
            assert_eq!(a.quarantined_at, Some(Tick(7)));
        }
        assert!(!s.get(AgentId(0)).quarantined);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut s = store();
        s.shuffle_order(&mut SimRng::new(8));
        let mut order = s.order().to_vec();
        order.sort();
        assert_eq!(order, s.agent_ids().collect::<Vec<_>>());
    }

    #[test]
    fn counts_active_infections() {
        let mut s = store();
        s.get_mut(AgentId(0)).infection = InfectionState::Exposed;
        s.get_mut(AgentId(1)).infection = InfectionState::Mild;
        s.get_mut(AgentId(2)).infection = InfectionState::Recovered;
        assert_eq!(s.active_infections(), 2);
    }
}
