//! Simulation observer trait for progress reporting and data collection.

use epi_agent::AgentStore;
use epi_core::Tick;

use crate::DailyRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — daily progress
///
/// ```rust,ignore
/// struct DailyPrinter;
///
/// impl SimObserver for DailyPrinter {
///     fn on_day(&mut self, record: &DailyRecord, _agents: &AgentStore) {
///         println!("day {}: {} cumulative cases", record.day, record.cumulative_cases);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `updated` is the number of agents processed this tick; zero once the
    /// epidemic has died out.
    fn on_tick_end(&mut self, _tick: Tick, _updated: usize) {}

    /// Called whenever a daily record is taken, day 0 included.
    fn on_day(&mut self, _record: &DailyRecord, _agents: &AgentStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
