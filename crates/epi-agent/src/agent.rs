//! The `Agent` record.
//!
//! Agents are stored by value in [`AgentStore`](crate::AgentStore).  Every
//! reference an agent holds (its cells, its household) is an id into an
//! arena owned by the same replication.

use epi_core::{ActivityKind, AgentId, CellId, HouseholdId, LocationKind, Sector, Tick};

use crate::{Activity, InfectionState, StageDurations};

// ── Demographics ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Microdata coding: 1 = male, 2 = female.
    pub fn from_code(code: i32) -> Gender {
        match code {
            1 => Gender::Male,
            2 => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

/// Attributes copied from a microdata person row.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demographics {
    pub person_id: u64,
    /// Household id in the source microdata (shared by every clone).
    pub source_household: u64,
    pub age: u8,
    pub gender: Gender,
    pub sector: Sector,
    /// Daily working hours; zero for non-workers.
    pub work_hours: f32,
    /// Hours spent per shopping trip.
    pub shopping_hours: f32,
    pub student: bool,
}

impl Demographics {
    #[inline]
    pub fn is_worker(&self) -> bool {
        self.work_hours > 0.0
    }
}

// ── Locations and groups ──────────────────────────────────────────────────────

/// Assigned locations.  Fixed once the assignment phase is done.
#[derive(Clone, Debug, Default)]
pub struct Locations {
    pub home: CellId,
    pub workplace: Option<CellId>,
    pub school: Option<CellId>,
    pub kindergarten: Option<CellId>,
    pub university: Option<CellId>,
    /// Favourite supermarkets.
    pub supermarkets: Vec<CellId>,
}

/// Sub-room index per location type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Groups {
    /// Flat within the home cell.
    pub home: u32,
    /// Class.
    pub school: u32,
    pub kindergarten: u32,
    /// Division.
    pub workplace: u32,
    pub university: u32,
}

impl Groups {
    /// The group this agent belongs to inside a cell of `kind`.
    pub fn for_kind(&self, kind: LocationKind) -> u32 {
        match kind {
            LocationKind::Home => self.home,
            LocationKind::School => self.school,
            LocationKind::Kindergarten => self.kindergarten,
            LocationKind::University => self.university,
            LocationKind::Workplace(_) => self.workplace,
            LocationKind::Supermarket | LocationKind::Street => 0,
        }
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub household: HouseholdId,
    pub demographics: Demographics,
    pub locations: Locations,
    pub groups: Groups,

    /// Cell the agent currently stands in.
    pub position: CellId,

    pub infection: InfectionState,
    pub exposed_at: Option<Tick>,
    pub infectious_at: Option<Tick>,
    pub onset_at: Option<Tick>,
    pub recovered_at: Option<Tick>,
    pub quarantined_at: Option<Tick>,
    /// Where the exposure happened; `None` for seeded infections.
    pub cell_of_infection: Option<CellId>,
    pub durations: StageDurations,
    /// Set once the agent has entered the case count.
    pub case_counted: bool,

    pub activity: Option<Activity>,
    pub activities_today: Vec<ActivityKind>,
    pub stay_at_home: bool,
    pub quarantined: bool,
}

impl Agent {
    /// A susceptible agent with no assignments yet.
    pub fn new(demographics: Demographics) -> Self {
        Self {
            id: AgentId::INVALID,
            household: HouseholdId::INVALID,
            demographics,
            locations: Locations::default(),
            groups: Groups::default(),
            position: CellId::INVALID,
            infection: InfectionState::Susceptible,
            exposed_at: None,
            infectious_at: None,
            onset_at: None,
            recovered_at: None,
            quarantined_at: None,
            cell_of_infection: None,
            durations: StageDurations::default(),
            case_counted: false,
            activity: None,
            activities_today: Vec::new(),
            stay_at_home: false,
            quarantined: false,
        }
    }

    #[inline]
    pub fn age(&self) -> u8 {
        self.demographics.age
    }

    /// Group index for the cell the agent currently stands in, given that
    /// cell's kind.
    #[inline]
    pub fn group_in(&self, kind: LocationKind) -> u32 {
        self.groups.for_kind(kind)
    }

    pub fn has_done_today(&self, kind: ActivityKind) -> bool {
        self.activities_today.contains(&kind)
    }

    /// Clear the per-day activity log.
    pub fn start_new_day(&mut self) {
        self.activities_today.clear();
    }
}
