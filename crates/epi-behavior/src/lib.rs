//! `epi-behavior` — what an agent decides to do with its day.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`intent`]   | `Intent`: start an activity at a cell for a number of ticks     |
//! | [`context`]  | `SimContext<'a>`: clock, regime, sector tables, settings        |
//! | [`settings`] | `ActivitySettings`: hours, age ranges, daytime window           |
//! | [`model`]    | `BehaviorModel` trait                                           |
//! | [`measures`] | `MeasureBehavior`: the measure-driven workday schedule          |
//! | [`noop`]     | `NoopBehavior`: agents never leave home                         |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The simulation loop asks the model for at most one [`Intent`] per agent
//! per tick and applies it through `Agent::initialize_activity`.  The model
//! only reads the agent; all mutation stays in `epi-sim`.

pub mod context;
pub mod error;
pub mod intent;
pub mod measures;
pub mod model;
pub mod noop;
pub mod settings;


pub use context::SimContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use measures::MeasureBehavior;
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use settings::ActivitySettings;
