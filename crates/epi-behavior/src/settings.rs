//! Fixed parameters of the daily schedule.

use crate::{BehaviorError, BehaviorResult};

/// Hours, age ranges and time windows used by the activity scheduler and
/// by the assignment of schools and kindergartens.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivitySettings {
    /// Hour at which workers, pupils and kindergarten kids set off.
    pub start_of_day_hour: u32,
    /// Optional activities may start in `[daytime_start, daytime_end)`.
    pub daytime_start: u32,
    pub daytime_end: u32,
    /// Inclusive school age range.
    pub school_age: (u8, u8),
    /// Inclusive kindergarten age range.
    pub kindergarten_age: (u8, u8),
    pub min_shopping_age: u8,
    pub hours_at_school: f64,
    pub hours_at_kindergarten: f64,
    pub hours_at_university: f64,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ActivitySettings {
    pub const DEFAULT: ActivitySettings = ActivitySettings {
        start_of_day_hour: 8,
        daytime_start: 8,
        daytime_end: 22,
        school_age: (6, 19),
        kindergarten_age: (0, 5),
        min_shopping_age: 14,
        hours_at_school: 5.0,
        hours_at_kindergarten: 5.0,
        hours_at_university: 4.0,
    };

    #[inline]
    pub fn is_school_age(&self, age: u8) -> bool {
        (self.school_age.0..=self.school_age.1).contains(&age)
    }

    #[inline]
    pub fn is_kindergarten_age(&self, age: u8) -> bool {
        (self.kindergarten_age.0..=self.kindergarten_age.1).contains(&age)
    }

    #[inline]
    pub fn is_daytime(&self, hour: u32) -> bool {
        (self.daytime_start..self.daytime_end).contains(&hour)
    }

    pub fn validate(&self) -> BehaviorResult<()> {
        if self.start_of_day_hour >= 24 || self.daytime_end > 24 {
            return Err(BehaviorError::Config(format!(
                "hours must lie within a day (start {}, daytime end {})",
                self.start_of_day_hour, self.daytime_end
            )));
        }
        if self.daytime_start > self.daytime_end {
            return Err(BehaviorError::Config(format!(
                "daytime window {}..{} is reversed",
                self.daytime_start, self.daytime_end
            )));
        }
        if self.school_age.0 > self.school_age.1 || self.kindergarten_age.0 > self.kindergarten_age.1 {
            return Err(BehaviorError::Config("age ranges must be ascending".into()));
        }
        for hours in [
            self.hours_at_school,
            self.hours_at_kindergarten,
            self.hours_at_university,
        ] {
            if !hours.is_finite() || hours < 0.0 {
                return Err(BehaviorError::Config(format!(
                    "activity hours must be non-negative, got {hours}"
                )));
            }
        }
        Ok(())
    }
}
