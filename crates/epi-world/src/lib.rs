//! `epi-world` — the location grid and the buildings stamped onto it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid`, `Cell`, vacant-street pool, occupant sets           |
//! | [`builder`] | `Building`, `Grid::build`, `Grid::build_at_random`, `Grid::fill_vacant` |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                              |
//!
//! Coordinates exist only for capacity bookkeeping.  Agents are placed in
//! cells directly; there is no notion of travel between them.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Building`.             |

pub mod builder;
pub mod error;
pub mod grid;


pub use builder::Building;
pub use error::{WorldError, WorldResult};
pub use grid::{Cell, Grid};
