//! Fluent builder for constructing a [`Sim`].

use log::debug;

use epi_agent::{AgentStore, DurationSampler};
use epi_behavior::BehaviorModel;
use epi_core::{AgentId, SimConfig, SimRng, Tick};
use epi_population::synthesize;
use epi_world::Grid;

use crate::assignment::{assign, build_locations};
use crate::{
    CaseCounter, EpidemicParams, FacilityCounts, ReferenceData, Sim, SimError, SimResult, World,
};

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — calendar start, horizon, ticks per hour, seed
/// - [`ReferenceData`] — microdata, sector tables, ratios, durations
/// - [`EpidemicParams`] — transmission, seeding, timetable
/// - `B: BehaviorModel` — the activity-decision model
///
/// All four are borrowed, so one set of inputs serves any number of
/// replications.
///
/// # Optional inputs (have defaults)
///
/// | Method      | Default        |
/// |-------------|----------------|
/// | `.seed(s)`  | `config.seed`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(&config, &reference, &params, &behavior)
///     .seed(SimRng::replication_seed(config.seed, 3))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<'a, B: BehaviorModel> {
    config:    &'a SimConfig,
    reference: &'a ReferenceData,
    params:    &'a EpidemicParams,
    behavior:  &'a B,
    seed:      Option<u64>,
}

impl<'a, B: BehaviorModel> SimBuilder<'a, B> {
    pub fn new(
        config:    &'a SimConfig,
        reference: &'a ReferenceData,
        params:    &'a EpidemicParams,
        behavior:  &'a B,
    ) -> Self {
        Self {
            config,
            reference,
            params,
            behavior,
            seed: None,
        }
    }

    /// Seed of this replication's random stream.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate inputs, synthesize the population, build and assign the
    /// world, and seed the initial infections.
    pub fn build(self) -> SimResult<Sim<'a, B>> {
        let Self {
            config,
            reference,
            params,
            behavior,
            seed,
        } = self;
        let seed = seed.unwrap_or(config.seed);

        // ── Preconditions, before any state exists ────────────────────────
        config.validate()?;
        reference.validate()?;
        params.validate(config, reference)?;
        let regime = params
            .timetable
            .active(config.start.date())
            .ok_or_else(|| SimError::InvalidParams("no regime in force at the start date".into()))?;
        let sampler = DurationSampler::new(&reference.durations, config.ticks_per_day())?;

        let mut rng = SimRng::new(seed);

        // ── Population ────────────────────────────────────────────────────
        let households = synthesize(&reference.households, params.target_population, &mut rng)?;
        let agents = AgentStore::from_households(households)?;
        if params.initial_infections > agents.len() {
            return Err(SimError::TooManyInitialInfections {
                initial: params.initial_infections,
                population: agents.len(),
            });
        }

        // ── Locations and assignment ──────────────────────────────────────
        let counts = FacilityCounts::derive(&agents, &reference.capacity, &reference.settings);
        let mut grid = Grid::new(params.grid_width, params.grid_height)?;
        build_locations(&mut grid, &counts, &mut rng)?;
        let mut world = World::new(grid, agents);
        assign(&mut world, &reference.capacity, &reference.settings, &mut rng)?;

        // ── Durations and initial infections ──────────────────────────────
        for agent in world.agents.iter_mut() {
            agent.durations = sampler.sample(&mut rng);
        }
        let mut cases = CaseCounter::default();
        for i in rng.sample_indices(world.population(), params.initial_infections) {
            let agent = world.agents.get_mut(AgentId(i as u32));
            if agent.seed_infectious(Tick::ZERO) {
                cases.count(agent.age());
            }
        }

        debug!(
            "seed {seed}: {} agents in {} households, {} schools, {} kindergartens, \
             {} universities, {} supermarkets, {} workplaces, {} initial infections",
            world.population(),
            world.agents.household_count(),
            counts.schools,
            counts.kindergartens,
            counts.universities,
            counts.supermarkets,
            counts.workplace_sections.len(),
            cases.cumulative_cases,
        );

        Ok(Sim {
            clock:             config.make_clock(),
            config,
            reference,
            params,
            behavior,
            seed,
            world,
            rng,
            regime,
            cases,
            records:           Vec::new(),
            simulate:          true,
            stay_home_delay:   params.stay_home_delay(config),
            quarantine_delay:  params.quarantine_delay(config),
            quarantine_window: params.quarantine_window(config),
            candidates:        Vec::new(),
        })
    }
}
