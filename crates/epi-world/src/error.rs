//! Location-grid error type.

use thiserror::Error;

use epi_core::{CellId, LocationKind};

/// Errors produced by `epi-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("grid dimensions {width}x{height} are empty or too large")]
    BadDimensions { width: u32, height: u32 },

    #[error("rectangle at ({x}, {y}) of size {width}x{height} leaves the grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("{cell} is already claimed as {kind}")]
    CellOccupied { cell: CellId, kind: LocationKind },

    #[error("no vacant street cell left for a {0}")]
    NoVacantCell(LocationKind),

    #[error("street is not a building type")]
    StreetBuilding,
}

pub type WorldResult<T> = Result<T, WorldError>;
