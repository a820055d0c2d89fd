//! CSV microdata loader.
//!
//! # CSV format
//!
//! One row per person.  Rows of the same household share `hid` and must
//! carry the same `weight`; the first row's weight wins.
//!
//! ```csv
//! hid,pid,age,gender,nace2,work_hours_day,shopping_hours,student,weight
//! 1,1,44,1,47,8.0,1.0,0,120
//! 1,2,41,2,-1,0.0,1.5,0,120
//! 2,3,21,2,0,0.0,1.0,1,35
//! ```
//!
//! `student` is `0` or `1`.  Households are returned in order of first
//! appearance.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{HouseholdRecord, HouseholdTable, PersonRecord, PopulationError, PopulationResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PersonRow {
    hid:            u64,
    pid:            u64,
    age:            u8,
    gender:         i32,
    nace2:          i32,
    work_hours_day: f32,
    shopping_hours: f32,
    student:        u8,
    weight:         u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

pub fn load_households_csv(path: &Path) -> PopulationResult<HouseholdTable> {
    let file = std::fs::File::open(path)?;
    load_households_reader(file)
}

/// Like [`load_households_csv`] but accepts any `Read` source.
pub fn load_households_reader<R: Read>(reader: R) -> PopulationResult<HouseholdTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut households: Vec<HouseholdRecord> = Vec::new();

    for result in csv_reader.deserialize::<PersonRow>() {
        let row = result.map_err(|e| PopulationError::Parse(e.to_string()))?;
        let student = match row.student {
            0 => false,
            1 => true,
            other => {
                return Err(PopulationError::Parse(format!(
                    "person {}: student must be 0 or 1, got {other}",
                    row.pid
                )));
            }
        };
        let slot = *index.entry(row.hid).or_insert_with(|| {
            households.push(HouseholdRecord {
                id:      row.hid,
                weight:  row.weight,
                persons: Vec::new(),
            });
            households.len() - 1
        });
        households[slot].persons.push(PersonRecord {
            person_id:      row.pid,
            age:            row.age,
            gender:         row.gender,
            division:       row.nace2,
            work_hours:     row.work_hours_day,
            shopping_hours: row.shopping_hours,
            student,
        });
    }

    let table = HouseholdTable::new(households);
    table.validate()?;
    Ok(table)
}
