//! `epi-sim` — one replication of the epidemic, from synthetic population
//! to daily case records.
//!
//! # Replication pipeline
//!
//! ```text
//! SimBuilder::build
//!   ① validate        — run parameters and reference data, before any state exists
//!   ② synthesize      — weighted household cloning up to the target size
//!   ③ build locations — facilities at random vacant cells, homes everywhere else
//!   ④ assign          — homes/flats, supermarkets, classes, kindergartens,
//!                        workplace divisions, universities
//!   ⑤ durations       — each agent draws its stage durations once
//!   ⑥ seed            — initial infections, counted as day-0 cases
//!
//! Sim::run, per tick:
//!   on a new day: record, extinction check, shuffle, reset logs,
//!                 regime lookup, random infections
//!   per agent in shuffled order:
//!     update infection → transmit → stay home → isolate → plan → step activity
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`reference`]   | `ReferenceData`, `CapacityRatios`                         |
//! | [`params`]      | `EpidemicParams`, `TransmissionTable`                     |
//! | [`world`]       | `World` (grid + agents), relocation                       |
//! | [`assignment`]  | `FacilityCounts`, location building, agent assignment     |
//! | [`record`]      | `DailyRecord`, `CaseCounter`, `ReplicationOutput`         |
//! | [`observer`]    | `SimObserver`, `NoopObserver`                             |
//! | [`builder`]     | `SimBuilder`                                              |
//! | [`sim`]         | `Sim` and its tick loop, `run_replication`                |
//! | [`error`]       | `SimError`, `SimResult<T>`                                |

pub mod assignment;
pub mod builder;
pub mod error;
pub mod observer;
pub mod params;
pub mod record;
pub mod reference;
pub mod sim;
pub mod world;

#[cfg(test)]
mod tests;

pub use assignment::FacilityCounts;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use params::{EpidemicParams, TransmissionTable};
pub use record::{CaseCounter, DailyRecord, ReplicationOutput};
pub use reference::{CapacityRatios, ReferenceData};
pub use sim::{Sim, run_replication};
pub use world::World;
