//! `epi-schedule` — policy measures over calendar time.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`regime`]      | `MeasureRegime`, `QuarantinePolicy`                       |
//! | [`timetable`]   | `MeasureTimetable` (`BTreeMap<NaiveDate, MeasureRegime>`) |
//! | [`sector`]      | `ProbabilityTable`, `SectorTables`                        |
//! | [`loader`]      | `load_timetable_*`, `load_probability_table_*`            |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Lookup model (summary)
//!
//! The active regime on date `d` is the entry with the greatest key `<= d`.
//! A regime carries open probabilities for schools, kindergartens,
//! universities and supermarkets, and names the columns of the sector
//! tables that hold its work-from-home, lockdown and short-time-work rates.

pub mod error;
pub mod loader;
pub mod regime;
pub mod sector;
pub mod timetable;


pub use error::{ScheduleError, ScheduleResult};
pub use loader::{
    load_probability_table_csv, load_probability_table_reader, load_timetable_csv,
    load_timetable_reader,
};
pub use regime::{MeasureRegime, QuarantinePolicy};
pub use sector::{ProbabilityTable, SectorTables};
pub use timetable::MeasureTimetable;
