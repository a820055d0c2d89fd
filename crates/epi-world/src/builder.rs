//! Stamping typed buildings onto the grid.

use epi_core::{BuildingId, CellId, LocationKind, SimRng};

use crate::{Grid, WorldError, WorldResult};

/// A typed building and the rectangle of cells it occupies.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub id: BuildingId,
    pub kind: LocationKind,
    pub cells: Vec<CellId>,
}

impl Grid {
    /// Claim the `width x height` rectangle with origin `(x, y)` for a new
    /// building of `kind`.
    ///
    /// Every target cell must still be street.  Nothing is claimed on error.
    pub fn build(
        &mut self,
        kind: LocationKind,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> WorldResult<BuildingId> {
        if kind.is_street() {
            return Err(WorldError::StreetBuilding);
        }
        let out_of_bounds = WorldError::OutOfBounds {
            x,
            y,
            width,
            height,
        };
        if width == 0 || height == 0 {
            return Err(out_of_bounds);
        }
        let (Some(x_end), Some(y_end)) = (x.checked_add(width), y.checked_add(height)) else {
            return Err(out_of_bounds);
        };
        if x_end > self.width() || y_end > self.height() {
            return Err(out_of_bounds);
        }

        let mut cells = Vec::with_capacity((width * height) as usize);
        for cy in y..y_end {
            for cx in x..x_end {
                let id = CellId(cy * self.width() + cx);
                if !self.is_vacant(id) {
                    return Err(WorldError::CellOccupied {
                        cell: id,
                        kind: self.kind(id),
                    });
                }
                cells.push(id);
            }
        }
        Ok(self.commit(kind, cells))
    }

    /// Claim one uniformly chosen vacant cell for a 1x1 building of `kind`.
    pub fn build_at_random(
        &mut self,
        kind: LocationKind,
        rng: &mut SimRng,
    ) -> WorldResult<BuildingId> {
        if kind.is_street() {
            return Err(WorldError::StreetBuilding);
        }
        if self.vacant_count() == 0 {
            return Err(WorldError::NoVacantCell(kind));
        }
        let cell = self.vacant_at(rng.gen_range(0..self.vacant_count()));
        Ok(self.commit(kind, vec![cell]))
    }

    /// Turn every remaining vacant cell into its own 1x1 building of `kind`.
    ///
    /// Cells are claimed in ascending id order.
    pub fn fill_vacant(&mut self, kind: LocationKind) -> WorldResult<Vec<BuildingId>> {
        if kind.is_street() {
            return Err(WorldError::StreetBuilding);
        }
        let mut remaining: Vec<CellId> = (0..self.vacant_count())
            .map(|slot| self.vacant_at(slot))
            .collect();
        remaining.sort_unstable();
        Ok(remaining
            .into_iter()
            .map(|cell| self.commit(kind, vec![cell]))
            .collect())
    }

    fn commit(&mut self, kind: LocationKind, cells: Vec<CellId>) -> BuildingId {
        let id = BuildingId(self.buildings.len() as u32);
        for &cell in &cells {
            self.claim(cell, kind, id);
        }
        self.buildings.push(Building { id, kind, cells });
        id
    }
}
