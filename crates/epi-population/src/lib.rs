//! `epi-population` — synthetic populations from household microdata.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`table`]      | `PersonRecord`, `HouseholdRecord`, `HouseholdTable`       |
//! | [`synth`]      | `synthesize`: weighted household cloning up to a target   |
//! | [`loader`]     | `load_households_csv` / `load_households_reader`          |
//! | [`sample`]     | `sample_table`: synthetic microdata for demos and tests   |
//! | [`error`]      | `PopulationError`, `PopulationResult<T>`                  |
//!
//! The table is read-only reference data: every replication of a batch
//! synthesizes its own population from the same shared `HouseholdTable`.

pub mod error;
pub mod loader;
pub mod sample;
pub mod synth;
pub mod table;


pub use error::{PopulationError, PopulationResult};
pub use loader::{load_households_csv, load_households_reader};
pub use sample::sample_table;
pub use synth::synthesize;
pub use table::{HouseholdRecord, HouseholdTable, PersonRecord};
