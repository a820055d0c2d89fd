//! The `Sim` struct and its tick loop.

use log::{debug, info, trace};

use epi_agent::{InfectionState, Transition};
use epi_behavior::{BehaviorModel, SimContext};
use epi_core::{AgentId, SimClock, SimConfig, SimRng, Tick};
use epi_schedule::{MeasureRegime, QuarantinePolicy};

use crate::{
    CaseCounter, DailyRecord, EpidemicParams, NoopObserver, ReferenceData, ReplicationOutput,
    SimBuilder, SimObserver, SimResult, TransmissionTable, World,
};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One replication: a world, its random stream, and the tick loop.
///
/// Each tick the clock advances one step (skipping the night at 01:00).
/// When the step crosses midnight, the day's bookkeeping runs first:
///
/// 1. **Record**: snapshot the case counters into a [`DailyRecord`].
/// 2. **Extinction**: with nothing exposed or infectious and no random
///    infections configured, agent updates stop for good.  Records are
///    still taken and running quarantines still lift until the horizon.
/// 3. **Shuffle** the processing order and clear daily activity logs.
/// 4. **Regime**: look up the measures in force on the new date.
/// 5. **Random infections**: expose random agents where they stand.
///
/// Then every agent, in shuffled order: update infection → transmit →
/// stay home → household isolation → plan → step activity.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<'a, B: BehaviorModel> {
    pub config: &'a SimConfig,
    pub reference: &'a ReferenceData,
    pub params: &'a EpidemicParams,
    pub behavior: &'a B,
    /// Seed this replication's stream was created from.
    pub seed: u64,

    pub clock: SimClock,
    pub world: World,
    pub rng: SimRng,

    /// Regime in force on the current date.
    pub(crate) regime: &'a MeasureRegime,
    pub(crate) cases: CaseCounter,
    pub(crate) records: Vec<DailyRecord>,
    /// Cleared once the epidemic has died out.
    pub(crate) simulate: bool,
    pub(crate) stay_home_delay: u64,
    pub(crate) quarantine_delay: u64,
    pub(crate) quarantine_window: u64,
    /// Scratch buffer for transmission candidates.
    pub(crate) candidates: Vec<AgentId>,
}

impl<'a, B: BehaviorModel> Sim<'a, B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.record_day_zero(observer);
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        self.record_day_zero(observer);
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Daily records taken so far, day 0 first.
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn cases(&self) -> &CaseCounter {
        &self.cases
    }

    pub fn regime(&self) -> &MeasureRegime {
        self.regime
    }

    /// `false` once the epidemic has died out and agent updates stopped.
    pub fn is_simulating(&self) -> bool {
        self.simulate
    }

    /// Consume the replication, keeping only its output.
    pub fn into_output(self) -> ReplicationOutput {
        let infected_ages = self
            .world
            .agents
            .iter()
            .filter(|a| a.infection != InfectionState::Susceptible)
            .map(|a| a.age())
            .collect();
        ReplicationOutput {
            seed: self.seed,
            population: self.world.population(),
            records: self.records,
            infected_ages,
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn record_day_zero<O: SimObserver>(&mut self, observer: &mut O) {
        if self.records.is_empty() {
            self.record_day(self.clock.current_tick, observer);
        }
    }

    fn record_day<O: SimObserver>(&mut self, tick: Tick, observer: &mut O) {
        let record = self.cases.snapshot(
            self.clock.day,
            tick,
            self.clock.now,
            self.world.population(),
        );
        debug!(
            "seed {} day {}: {} new, {} cumulative",
            self.seed, record.day, record.new_cases, record.cumulative_cases
        );
        observer.on_day(&record, &self.world.agents);
        self.records.push(record);
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let step = self.clock.advance();
        observer.on_tick_start(step.tick);
        if step.new_day {
            self.start_day(step.tick, observer);
        }
        let updated = if self.simulate {
            self.update_agents(step.tick)
        } else {
            self.release_quarantines(step.tick);
            0
        };
        observer.on_tick_end(step.tick, updated);
    }

    fn start_day<O: SimObserver>(&mut self, tick: Tick, observer: &mut O) {
        self.record_day(tick, observer);

        let rate = self.params.random_infection_rate;
        if self.simulate && self.world.agents.active_infections() == 0 && rate == 0.0 {
            debug!("seed {}: epidemic over on day {}", self.seed, self.clock.day);
            self.simulate = false;
        }

        self.world.agents.shuffle_order(&mut self.rng);
        for agent in self.world.agents.iter_mut() {
            agent.start_new_day();
        }

        let params = self.params;
        if let Some(regime) = params.timetable.active(self.clock.date()) {
            if regime.name != self.regime.name {
                debug!("seed {}: regime '{}' from {}", self.seed, regime.name, self.clock.date());
            }
            self.regime = regime;
        }

        self.random_infections(tick, rate);
    }

    /// Below 1 the rate is a daily probability of one exposure; otherwise
    /// the rounded number of exposure attempts per day.
    fn random_infections(&mut self, tick: Tick, rate: f64) {
        let attempts = if rate < 1.0 {
            u64::from(self.rng.gen_bool(rate))
        } else {
            rate.round() as u64
        };
        let n = self.world.population();
        for _ in 0..attempts {
            let id = AgentId(self.rng.gen_range(0..n) as u32);
            let agent = self.world.agents.get_mut(id);
            let cell = agent.position;
            if agent.expose(tick, Some(cell)) {
                trace!("{tick}: random exposure of {id} in {cell}");
            }
        }
    }

    /// Quarantines still running when the epidemic died out keep counting
    /// down and lift on schedule.
    fn release_quarantines(&mut self, tick: Tick) {
        let window = self.quarantine_window;
        for agent in self.world.agents.iter_mut().filter(|a| a.quarantined) {
            agent.update_quarantine(tick, window);
        }
    }

    /// Process every agent once, in the current shuffled order.
    fn update_agents(&mut self, tick: Tick) -> usize {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let world = &mut self.world;
        let rng = &mut self.rng;
        let cases = &mut self.cases;
        let candidates = &mut self.candidates;
        let transmission = &self.params.transmission;
        let ticks_per_hour = self.config.ticks_per_hour;
        let regime = self.regime;
        let ctx = SimContext {
            tick,
            clock: &self.clock,
            ticks_per_hour,
            regime,
            sectors: &self.reference.sectors,
            settings: &self.reference.settings,
        };

        let n = world.population();
        for i in 0..n {
            let id = world.agents.order_at(i);

            let agent = world.agents.get_mut(id);
            if let Some(Transition::Onset { .. }) = agent.update_infection(tick, rng) {
                if agent.mark_case() {
                    cases.count(agent.age());
                }
            }

            transmit(world, id, tick, transmission, ticks_per_hour, rng, candidates);

            let agent = world.agents.get_mut(id);
            agent.decide_stay_home(tick, self.stay_home_delay);
            if regime.quarantine == QuarantinePolicy::Household
                && agent.isolation_due(tick, self.quarantine_delay)
            {
                world.agents.isolate_household(id, tick);
            }
            let agent = world.agents.get_mut(id);
            agent.update_quarantine(tick, self.quarantine_window);

            if let Some(intent) = self.behavior.plan(agent, &ctx, rng) {
                agent.initialize_activity(intent.kind, intent.target, intent.duration, intent.overwrite);
            }
            if let Some(destination) = agent.step_activity() {
                world.relocate(id, destination);
            }
        }
        n
    }
}

/// One exposure attempt by `id` against a random co-occupant of the same
/// cell and group.
pub(crate) fn transmit(
    world: &mut World,
    id: AgentId,
    tick: Tick,
    transmission: &TransmissionTable,
    ticks_per_hour: u32,
    rng: &mut SimRng,
    candidates: &mut Vec<AgentId>,
) {
    let agent = world.agents.get(id);
    let cell = agent.position;
    if !agent.infection.is_infectious() || !cell.is_valid() {
        return;
    }
    let occupants = world.grid.occupants(cell);
    if occupants.len() <= 1 {
        return;
    }
    let kind = world.grid.kind(cell);
    let group = agent.group_in(kind);

    candidates.clear();
    candidates.extend(
        occupants
            .iter()
            .copied()
            .filter(|&other| other != id && world.agents.get(other).group_in(kind) == group),
    );
    let Some(&target) = rng.choose(candidates) else {
        return;
    };
    if world.agents.get(target).infection != InfectionState::Susceptible {
        return;
    }
    if rng.gen_bool(transmission.per_tick(kind, ticks_per_hour))
        && world.agents.get_mut(target).expose(tick, Some(cell))
    {
        trace!("{tick}: {id} exposed {target} in {kind} {cell}");
    }
}

// ── Replication entry point ───────────────────────────────────────────────────

/// Build and run one full replication with `seed`.
///
/// A pure function of its inputs: the same arguments always produce the
/// same output.
pub fn run_replication<B: BehaviorModel>(
    config: &SimConfig,
    reference: &ReferenceData,
    params: &EpidemicParams,
    behavior: &B,
    seed: u64,
) -> SimResult<ReplicationOutput> {
    let mut sim = SimBuilder::new(config, reference, params, behavior)
        .seed(seed)
        .build()?;
    info!(
        "replication seed {seed}: {} agents, {} days",
        sim.world.population(),
        config.n_days
    );
    sim.run(&mut NoopObserver)?;
    let output = sim.into_output();
    info!(
        "replication seed {seed}: {} cumulative cases",
        output.records.last().map_or(0, |r| r.cumulative_cases)
    );
    Ok(output)
}
