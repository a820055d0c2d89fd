//! Facility sizing, location building, and the one-time assignment of
//! agents to locations.
//!
//! Every random choice is a uniform draw over the currently valid options.
//! Facility counts are floored at one, so every agent that needs a
//! facility of some kind gets one.

use std::collections::BTreeSet;

use log::debug;
use rustc_hash::FxHashMap;

use epi_agent::AgentStore;
use epi_behavior::ActivitySettings;
use epi_core::{CellId, HouseholdId, LocationKind, SimRng};
use epi_world::{Grid, WorldError};

use crate::{CapacityRatios, SimError, SimResult, World};

// ── FacilityCounts ────────────────────────────────────────────────────────────

/// Number of facilities of each kind for one population.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacilityCounts {
    pub supermarkets: usize,
    pub schools: usize,
    pub kindergartens: usize,
    pub universities: usize,
    /// One workplace per section present among workers, ascending.
    pub workplace_sections: Vec<u8>,
}

impl FacilityCounts {
    pub fn derive(agents: &AgentStore, capacity: &CapacityRatios, settings: &ActivitySettings) -> Self {
        let pupils = agents
            .iter()
            .filter(|a| settings.is_school_age(a.age()))
            .count();
        let kids = agents
            .iter()
            .filter(|a| settings.is_kindergarten_age(a.age()))
            .count();
        let students = agents.iter().filter(|a| a.demographics.student).count();
        let sections: BTreeSet<u8> = agents
            .iter()
            .filter(|a| a.demographics.is_worker())
            .map(|a| a.demographics.sector.section())
            .collect();

        let at_least_one = |n: usize, per: u32| (n / per.max(1) as usize).max(1);
        Self {
            supermarkets: at_least_one(agents.len(), capacity.agents_per_supermarket),
            schools: at_least_one(pupils, capacity.pupils_per_school),
            kindergartens: at_least_one(kids, capacity.kids_per_kindergarten),
            universities: at_least_one(students, capacity.students_per_university),
            workplace_sections: sections.into_iter().collect(),
        }
    }

    /// Cells taken by facilities.
    pub fn total(&self) -> usize {
        self.supermarkets
            + self.schools
            + self.kindergartens
            + self.universities
            + self.workplace_sections.len()
    }
}

// ── Location building ─────────────────────────────────────────────────────────

/// Build every facility at a random vacant cell, then turn all remaining
/// vacant cells into homes.
pub fn build_locations(grid: &mut Grid, counts: &FacilityCounts, rng: &mut SimRng) -> SimResult<()> {
    let batches = [
        (LocationKind::Supermarket, counts.supermarkets),
        (LocationKind::School, counts.schools),
        (LocationKind::Kindergarten, counts.kindergartens),
        (LocationKind::University, counts.universities),
    ];
    for (kind, n) in batches {
        for _ in 0..n {
            grid.build_at_random(kind, rng)?;
        }
    }
    for &section in &counts.workplace_sections {
        grid.build_at_random(LocationKind::Workplace(section), rng)?;
    }

    let homes = grid.fill_vacant(LocationKind::Home)?;
    if homes.is_empty() {
        return Err(WorldError::NoVacantCell(LocationKind::Home).into());
    }
    debug!(
        "built {} facilities and {} homes on a {}x{} grid",
        counts.total(),
        homes.len(),
        grid.width(),
        grid.height()
    );
    Ok(())
}

// ── Assignment ────────────────────────────────────────────────────────────────

/// Assign every agent its home, supermarkets, school class, kindergarten,
/// workplace division and university.
pub fn assign(
    world: &mut World,
    capacity: &CapacityRatios,
    settings: &ActivitySettings,
    rng: &mut SimRng,
) -> SimResult<()> {
    assign_homes(world, rng)?;
    assign_supermarkets(world, capacity, rng)?;
    assign_schools(world, capacity, settings, rng)?;
    assign_kindergartens(world, settings, rng)?;
    assign_workplaces(world, capacity, rng)?;
    assign_universities(world, rng)?;
    Ok(())
}

fn pick(cells: &[CellId], kind: LocationKind, rng: &mut SimRng) -> SimResult<CellId> {
    rng.choose(cells).copied().ok_or(SimError::MissingFacility(kind))
}

/// Households move into empty homes first.  Once none are left, further
/// households share a random home as separate flats.
fn assign_homes(world: &mut World, rng: &mut SimRng) -> SimResult<()> {
    let homes = world.grid.cells_of_kind(LocationKind::Home);
    let mut empty = homes.clone();

    for h in 0..world.agents.household_count() {
        let hid = HouseholdId(h as u32);
        let home = if empty.is_empty() {
            pick(&homes, LocationKind::Home, rng)?
        } else {
            empty.swap_remove(rng.gen_range(0..empty.len()))
        };

        let cell = world.grid.cell_mut(home);
        let flat = cell.n_groups;
        cell.n_groups += 1;
        cell.n_users += 1;

        let members = world.agents.household(hid).to_vec();
        for member in members {
            let agent = world.agents.get_mut(member);
            agent.locations.home = home;
            agent.groups.home = flat;
            world.relocate(member, home);
        }
    }
    Ok(())
}

fn assign_supermarkets(world: &mut World, capacity: &CapacityRatios, rng: &mut SimRng) -> SimResult<()> {
    let supermarkets = world.grid.cells_of_kind(LocationKind::Supermarket);
    for agent in world.agents.iter_mut() {
        agent.locations.supermarkets = (0..capacity.favourite_supermarkets)
            .map(|_| pick(&supermarkets, LocationKind::Supermarket, rng))
            .collect::<SimResult<_>>()?;
    }
    for &cell in &supermarkets {
        world.grid.cell_mut(cell).n_groups = 1;
    }
    Ok(())
}

/// Pupils pick a school; each school is then split into classes of
/// `pupils_per_class` on average, and every pupil draws its class.
fn assign_schools(
    world: &mut World,
    capacity: &CapacityRatios,
    settings: &ActivitySettings,
    rng: &mut SimRng,
) -> SimResult<()> {
    let schools = world.grid.cells_of_kind(LocationKind::School);
    let World { grid, agents } = world;

    for agent in agents.iter_mut().filter(|a| settings.is_school_age(a.age())) {
        let school = pick(&schools, LocationKind::School, rng)?;
        agent.locations.school = Some(school);
        grid.cell_mut(school).n_users += 1;
    }
    split_into_groups(grid, &schools, capacity.pupils_per_class);

    for agent in agents.iter_mut() {
        if let Some(school) = agent.locations.school {
            agent.groups.school = rng.gen_range(0..grid.cell(school).n_groups);
        }
    }
    Ok(())
}

/// Each kindergarten is a single group.
fn assign_kindergartens(world: &mut World, settings: &ActivitySettings, rng: &mut SimRng) -> SimResult<()> {
    let kindergartens = world.grid.cells_of_kind(LocationKind::Kindergarten);
    let World { grid, agents } = world;

    for agent in agents
        .iter_mut()
        .filter(|a| settings.is_kindergarten_age(a.age()))
    {
        let kindergarten = pick(&kindergartens, LocationKind::Kindergarten, rng)?;
        agent.locations.kindergarten = Some(kindergarten);
        agent.groups.kindergarten = 0;
        grid.cell_mut(kindergarten).n_users += 1;
    }
    for &cell in &kindergartens {
        grid.cell_mut(cell).n_groups = 1;
    }
    Ok(())
}

/// Workers pick a workplace of their own section; each workplace is then
/// split into divisions of `colleagues_per_division` on average.
fn assign_workplaces(world: &mut World, capacity: &CapacityRatios, rng: &mut SimRng) -> SimResult<()> {
    let mut by_section: FxHashMap<u8, Vec<CellId>> = FxHashMap::default();
    for building in world.grid.buildings() {
        if let LocationKind::Workplace(section) = building.kind {
            by_section
                .entry(section)
                .or_default()
                .extend_from_slice(&building.cells);
        }
    }
    let mut workplaces: Vec<CellId> = by_section.values().flatten().copied().collect();
    workplaces.sort_unstable();

    let World { grid, agents } = world;
    for agent in agents.iter_mut().filter(|a| a.demographics.is_worker()) {
        let kind = LocationKind::Workplace(agent.demographics.sector.section());
        let options = by_section
            .get(&agent.demographics.sector.section())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let workplace = pick(options, kind, rng)?;
        agent.locations.workplace = Some(workplace);
        grid.cell_mut(workplace).n_users += 1;
    }
    split_into_groups(grid, &workplaces, capacity.colleagues_per_division);

    for agent in agents.iter_mut() {
        if let Some(workplace) = agent.locations.workplace {
            agent.groups.workplace = rng.gen_range(0..grid.cell(workplace).n_groups);
        }
    }
    Ok(())
}

/// Each university is a single group.
fn assign_universities(world: &mut World, rng: &mut SimRng) -> SimResult<()> {
    let universities = world.grid.cells_of_kind(LocationKind::University);
    let World { grid, agents } = world;

    for agent in agents.iter_mut().filter(|a| a.demographics.student) {
        let university = pick(&universities, LocationKind::University, rng)?;
        agent.locations.university = Some(university);
        agent.groups.university = 0;
        grid.cell_mut(university).n_users += 1;
    }
    for &cell in &universities {
        grid.cell_mut(cell).n_groups = 1;
    }
    Ok(())
}

fn split_into_groups(grid: &mut Grid, cells: &[CellId], per_group: u32) {
    for &cell in cells {
        let cell = grid.cell_mut(cell);
        cell.n_groups = (cell.n_users / per_group.max(1)).max(1);
    }
}
