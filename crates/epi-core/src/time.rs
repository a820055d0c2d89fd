//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter paired with a calendar
//! datetime held in `SimClock`.  One tick is `1 / ticks_per_hour` of an hour.
//! The nighttime hours are not simulated: when the clock reaches 01:00 it
//! jumps forward by `night_skip_hours` in one step, so with the default
//! settings a simulated day is 18 ticks (07:00 through 00:00).
//!
//! Durations in agent state are counted in ticks, never in wall-clock time,
//! so the skip does not distort them.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Result of one `SimClock::advance` call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TickStep {
    /// The tick being processed.
    pub tick: Tick,
    /// `true` when this step crossed midnight.
    pub new_day: bool,
}

/// Calendar clock with a nightly time skip.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Datetime of tick 0.
    pub start: NaiveDateTime,
    /// Current datetime.
    pub now: NaiveDateTime,
    /// Number of ticks already stepped through.
    pub current_tick: Tick,
    /// Days elapsed since `start` (0 on the first day).
    pub day: u32,
    step: Duration,
    night_skip: Duration,
}

impl SimClock {
    pub fn new(start: NaiveDateTime, ticks_per_hour: u32, night_skip_hours: u32) -> Self {
        Self {
            start,
            now: start,
            current_tick: Tick::ZERO,
            day: 0,
            step: Duration::seconds(3_600 / i64::from(ticks_per_hour.max(1))),
            night_skip: Duration::hours(i64::from(night_skip_hours)),
        }
    }

    /// Step the calendar forward by one tick.
    ///
    /// Reaching 01:00 triggers the night skip atomically.  The returned
    /// `tick` is the index of the tick that the caller should now process.
    pub fn advance(&mut self) -> TickStep {
        let tick = self.current_tick;
        let before = self.now.date();

        self.now += self.step;
        if self.now.hour() == 1 && self.now.minute() == 0 && self.now.second() == 0 {
            self.now += self.night_skip;
        }

        self.current_tick = tick + 1;
        let new_day = self.now.date() != before;
        if new_day {
            self.day += 1;
        }
        TickStep { tick, new_day }
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.now.date()
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.now.hour()
    }

    /// `true` on the first tick of wall-clock hour `hour`.
    #[inline]
    pub fn is_hour_start(&self, hour: u32) -> bool {
        self.now.hour() == hour && self.now.minute() == 0
    }

    /// 0 = Monday .. 6 = Sunday.
    #[inline]
    pub fn weekday_index(&self) -> u32 {
        self.now.weekday().num_days_from_monday()
    }

    /// Monday through Friday.
    #[inline]
    pub fn is_workday(&self) -> bool {
        self.weekday_index() < 5
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (day {} {})",
            self.current_tick,
            self.day,
            self.now.format("%Y-%m-%d %H:%M")
        )
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Calendar and execution settings shared by every replication of a batch.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Datetime of tick 0, normally midnight of the first simulated day.
    pub start: NaiveDateTime,

    /// Number of daily records produced, including the day-0 record.
    pub n_days: u32,

    /// Must divide 3600.  Default: 1.
    pub ticks_per_hour: u32,

    /// Hours jumped over at 01:00 each night.  Default: 6.
    pub night_skip_hours: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl SimConfig {
    pub fn new(start: NaiveDateTime, n_days: u32, seed: u64) -> Self {
        Self {
            start,
            n_days,
            ticks_per_hour: 1,
            night_skip_hours: 6,
            seed,
            num_threads: None,
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.n_days == 0 {
            return Err(CoreError::Config("n_days must be at least 1".into()));
        }
        if self.ticks_per_hour == 0 || 3_600 % self.ticks_per_hour != 0 {
            return Err(CoreError::Config(format!(
                "ticks_per_hour must divide 3600, got {}",
                self.ticks_per_hour
            )));
        }
        if self.night_skip_hours >= 24 {
            return Err(CoreError::Config(format!(
                "night_skip_hours must be below 24, got {}",
                self.night_skip_hours
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }

    /// Simulated ticks per calendar day.  18 with the defaults.
    #[inline]
    pub fn ticks_per_day(&self) -> u64 {
        u64::from(24 - self.night_skip_hours.min(23)) * u64::from(self.ticks_per_hour)
    }

    #[inline]
    pub fn ticks_for_days(&self, days: u64) -> u64 {
        days * self.ticks_per_day()
    }

    /// Total ticks in the horizon.  Day 0 is recorded before the first tick,
    /// each later day on the tick that crosses midnight.
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.ticks_for_days(u64::from(self.n_days.saturating_sub(1)))
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start, self.ticks_per_hour, self.night_skip_hours)
    }
}
