//! The measure-driven workday schedule.
//!
//! On a workday, for an agent that is not staying home:
//!
//! 1. At the start-of-day hour, workers go to work (or work from home if
//!    any of the work-from-home, lockdown or short-time-work draws hits),
//!    otherwise pupils go to school, otherwise kindergarten kids go to
//!    kindergarten.  Each of these overrides whatever is running.
//! 2. If no activity is running and it is daytime, students may go to
//!    university and agents old enough may go shopping, each at most once
//!    per day.
//!
//! Weekends have no activities.

use epi_agent::Agent;
use epi_core::{ActivityKind, SimRng};

use crate::{BehaviorModel, Intent, SimContext};

/// Hours, ages and windows come from [`SimContext::settings`].
#[derive(Copy, Clone, Debug, Default)]
pub struct MeasureBehavior;

impl MeasureBehavior {
    fn start_of_day(&self, agent: &Agent, ctx: &SimContext<'_>, rng: &mut SimRng) -> Option<Intent> {
        let d = &agent.demographics;
        let loc = &agent.locations;
        let regime = ctx.regime;

        if d.is_worker() {
            let workplace = loc.workplace?;
            // Three independent draws, all taken.
            let from_home = rng.gen_bool(
                ctx.sectors
                    .work_from_home(regime.work_from_home.as_deref(), d.sector),
            );
            let closed = rng.gen_bool(
                ctx.sectors
                    .lockdown(regime.sector_lockdown.as_deref(), d.sector),
            );
            let reduced = rng.gen_bool(
                ctx.sectors
                    .short_time_work(regime.short_time_work.as_deref(), d.sector),
            );
            let target = if from_home || closed || reduced {
                loc.home
            } else {
                workplace
            };
            return Some(Intent {
                kind: ActivityKind::AtWork,
                target,
                duration: ctx.ticks_for_hours(f64::from(d.work_hours)),
                overwrite: true,
            });
        }

        if let Some(school) = loc.school {
            return rng.gen_bool(regime.school).then(|| Intent {
                kind: ActivityKind::AtSchool,
                target: school,
                duration: ctx.ticks_for_hours(ctx.settings.hours_at_school),
                overwrite: true,
            });
        }

        if let Some(kindergarten) = loc.kindergarten {
            return rng.gen_bool(regime.kindergarten).then(|| Intent {
                kind: ActivityKind::AtKindergarten,
                target: kindergarten,
                duration: ctx.ticks_for_hours(ctx.settings.hours_at_kindergarten),
                overwrite: true,
            });
        }

        None
    }

    fn daytime(&self, agent: &Agent, ctx: &SimContext<'_>, rng: &mut SimRng) -> Option<Intent> {
        let d = &agent.demographics;
        let regime = ctx.regime;

        if d.student {
            if let Some(university) = agent.locations.university {
                if rng.gen_bool(regime.university) && !agent.has_done_today(ActivityKind::AtUniversity) {
                    return Some(Intent {
                        kind: ActivityKind::AtUniversity,
                        target: university,
                        duration: ctx.ticks_for_hours(ctx.settings.hours_at_university),
                        overwrite: false,
                    });
                }
            }
        }

        if d.age >= ctx.settings.min_shopping_age
            && rng.gen_bool(regime.supermarket)
            && !agent.has_done_today(ActivityKind::Shopping)
        {
            let &supermarket = rng.choose(&agent.locations.supermarkets)?;
            return Some(Intent {
                kind: ActivityKind::Shopping,
                target: supermarket,
                duration: ctx.ticks_for_hours(f64::from(d.shopping_hours)),
                overwrite: false,
            });
        }

        None
    }
}

impl BehaviorModel for MeasureBehavior {
    fn plan(&self, agent: &Agent, ctx: &SimContext<'_>, rng: &mut SimRng) -> Option<Intent> {
        if !ctx.clock.is_workday() || agent.stay_at_home {
            return None;
        }
        if ctx.clock.is_hour_start(ctx.settings.start_of_day_hour) {
            if let Some(intent) = self.start_of_day(agent, ctx, rng) {
                return Some(intent);
            }
        }
        if agent.activity.is_none() && ctx.settings.is_daytime(ctx.clock.hour()) {
            return self.daytime(agent, ctx, rng);
        }
        None
    }
}
