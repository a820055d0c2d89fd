//! `epi-agent` — agents and the arena that owns them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent`, `Demographics`, `Gender`, `Locations`, `Groups`  |
//! | [`infection`]   | `InfectionState`, `Transition`, per-tick state update     |
//! | [`duration`]    | `DurationParams`, `DurationSampler`, `StageDurations`     |
//! | [`activity`]    | `Activity`, initialise / step the current activity        |
//! | [`care`]        | Stay-at-home and household-quarantine rules               |
//! | [`store`]       | `AgentStore` arena with household back-references         |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on parameter types.      |

pub mod activity;
pub mod agent;
pub mod care;
pub mod duration;
pub mod error;
pub mod infection;
pub mod store;

#[cfg(test)]
mod tests;

pub use activity::Activity;
pub use agent::{Agent, Demographics, Gender, Groups, Locations};
pub use duration::{DurationParams, DurationSampler, MeanVariance, StageDurations};
pub use error::{AgentError, AgentResult};
pub use infection::{InfectionState, Transition, symptomatic_probability};
pub use store::AgentStore;
