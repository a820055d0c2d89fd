//! In-memory household microdata.

use crate::{PopulationError, PopulationResult};

/// One person row of the microdata.
#[derive(Clone, Debug, PartialEq)]
pub struct PersonRecord {
    pub person_id: u64,
    pub age: u8,
    /// 1 = male, 2 = female.
    pub gender: i32,
    /// NACE division; values <= 0 or unknown codes are replaced at synthesis.
    pub division: i32,
    pub work_hours: f32,
    pub shopping_hours: f32,
    pub student: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HouseholdRecord {
    pub id: u64,
    /// Number of times this household appears in the sampling pool.
    pub weight: u32,
    pub persons: Vec<PersonRecord>,
}

/// The full microdata table.
#[derive(Clone, Debug, Default)]
pub struct HouseholdTable {
    pub households: Vec<HouseholdRecord>,
}

impl HouseholdTable {
    pub fn new(households: Vec<HouseholdRecord>) -> Self {
        Self { households }
    }

    pub fn len(&self) -> usize {
        self.households.len()
    }

    pub fn is_empty(&self) -> bool {
        self.households.is_empty()
    }

    pub fn person_count(&self) -> usize {
        self.households.iter().map(|h| h.persons.len()).sum()
    }

    /// Checks required before sampling.
    pub fn validate(&self) -> PopulationResult<()> {
        if self.households.is_empty() {
            return Err(PopulationError::EmptyTable);
        }
        if let Some(h) = self.households.iter().find(|h| h.persons.is_empty()) {
            return Err(PopulationError::EmptyHousehold(h.id));
        }
        if self.households.iter().all(|h| h.weight == 0) {
            return Err(PopulationError::ZeroWeight);
        }
        Ok(())
    }
}
