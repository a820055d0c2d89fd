use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("measure timetable is empty")]
    EmptyTimetable,

    #[error("measure timetable starts on {first}, after the simulation start {start}")]
    StartsTooLate { first: NaiveDate, start: NaiveDate },

    #[error("regime {regime:?}: {field} probability {value} is outside [0, 1]")]
    InvalidProbability {
        regime: String,
        field: &'static str,
        value: f64,
    },

    #[error("regime {regime:?} refers to missing {table} column {column:?}")]
    MissingColumn {
        regime: String,
        table: &'static str,
        column: String,
    },

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
