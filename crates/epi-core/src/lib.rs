//! `epi-core` — foundational types for the `epigrid` epidemic simulator.
//!
//! Every other `epi-*` crate depends on this one.  It has no `epi-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `CellId`, `BuildingId`, `HouseholdId`           |
//! | [`time`]        | `Tick`, `SimClock` (calendar clock with night skip), `SimConfig` |
//! | [`rng`]         | `SimRng` (one stream per replication)                      |
//! | [`kind`]        | `LocationKind`, `ActivityKind`                             |
//! | [`sector`]      | `Sector` (NACE division and section)                       |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod sector;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, BuildingId, CellId, HouseholdId};
pub use kind::{ActivityKind, LocationKind};
pub use rng::SimRng;
pub use sector::Sector;
pub use time::{SimClock, SimConfig, Tick, TickStep};
