//! Row-major grid of location cells.
//!
//! # Vacant pool
//!
//! Unclaimed (street) cells are tracked in a swap-remove pool with a reverse
//! index, so both "claim this specific cell" and "claim a uniformly random
//! vacant cell" are O(1).  A claimed cell never re-enters the pool.

use epi_core::{AgentId, BuildingId, CellId, LocationKind};

use crate::{Building, WorldError, WorldResult};

const NOT_VACANT: u32 = u32::MAX;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One location cell.
#[derive(Clone, Debug)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    kind: LocationKind,
    /// Owning building, `INVALID` while the cell is street.
    pub building: BuildingId,
    /// Agents currently standing in this cell.
    pub occupants: Vec<AgentId>,
    /// Agents (or households, for homes) assigned to this location.
    pub n_users: u32,
    /// Number of sub-rooms: classes, divisions, or flats.
    pub n_groups: u32,
}

impl Cell {
    fn street(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            kind: LocationKind::Street,
            building: BuildingId::INVALID,
            occupants: Vec::new(),
            n_users: 0,
            n_groups: 0,
        }
    }

    /// The cell's type.  Fixed once a building claims the cell.
    #[inline]
    pub fn kind(&self) -> LocationKind {
        self.kind
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    pub(crate) buildings: Vec<Building>,
    vacant: Vec<CellId>,
    vacant_slot: Vec<u32>,
}

impl Grid {
    /// An all-street grid of `width x height` cells.
    pub fn new(width: u32, height: u32) -> WorldResult<Self> {
        let n = width
            .checked_mul(height)
            .filter(|&n| n > 0 && n < u32::MAX)
            .ok_or(WorldError::BadDimensions { width, height })?;

        let mut cells = Vec::with_capacity(n as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::street(x, y));
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            buildings: Vec::new(),
            vacant: (0..n).map(CellId).collect(),
            vacant_slot: (0..n).collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn cell_id(&self, x: u32, y: u32) -> Option<CellId> {
        (x < self.width && y < self.height).then(|| CellId(y * self.width + x))
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: CellId) -> LocationKind {
        self.cells[id.index()].kind
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (CellId(i as u32), c))
    }

    /// All cells currently tagged `kind`, ascending.
    pub fn cells_of_kind(&self, kind: LocationKind) -> Vec<CellId> {
        self.cells()
            .filter(|(_, c)| c.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, id: BuildingId) -> &Building {
        &self.buildings[id.index()]
    }

    // ── Vacant pool ───────────────────────────────────────────────────────

    #[inline]
    pub fn vacant_count(&self) -> usize {
        self.vacant.len()
    }

    #[inline]
    pub fn is_vacant(&self, id: CellId) -> bool {
        self.vacant_slot[id.index()] != NOT_VACANT
    }

    /// Vacant cell at pool position `slot`.  Pool order is unspecified.
    #[inline]
    pub(crate) fn vacant_at(&self, slot: usize) -> CellId {
        self.vacant[slot]
    }

    /// Tag a street cell and drop it from the vacant pool.
    pub(crate) fn claim(&mut self, id: CellId, kind: LocationKind, building: BuildingId) {
        let slot = self.vacant_slot[id.index()];
        debug_assert_ne!(slot, NOT_VACANT, "{id} claimed twice");
        let last = self.vacant.len() - 1;
        self.vacant.swap(slot as usize, last);
        let moved = self.vacant[slot as usize];
        self.vacant_slot[moved.index()] = slot;
        self.vacant.pop();
        self.vacant_slot[id.index()] = NOT_VACANT;

        let cell = &mut self.cells[id.index()];
        cell.kind = kind;
        cell.building = building;
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    #[inline]
    pub fn occupants(&self, id: CellId) -> &[AgentId] {
        &self.cells[id.index()].occupants
    }

    pub fn add_occupant(&mut self, id: CellId, agent: AgentId) {
        self.cells[id.index()].occupants.push(agent);
    }

    /// Remove `agent` from the cell.  Returns `false` if it was not there.
    pub fn remove_occupant(&mut self, id: CellId, agent: AgentId) -> bool {
        let occupants = &mut self.cells[id.index()].occupants;
        match occupants.iter().position(|&a| a == agent) {
            Some(pos) => {
                occupants.swap_remove(pos);
                true
            }
            None => false,
        }
    }
}
