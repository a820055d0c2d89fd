//! Weighted population synthesis.
//!
//! Households are drawn with replacement, each with probability
//! proportional to its sampling weight, and cloned whole until the
//! population reaches the target.  Households are never split, so the
//! result may overshoot the target by less than one household.

use log::debug;
use rand::distributions::{Distribution, WeightedIndex};

use epi_agent::{Agent, Demographics, Gender};
use epi_core::{Sector, SimRng};

use crate::{HouseholdTable, PersonRecord, PopulationError, PopulationResult};

/// Draw households from `table` until at least `target` agents exist.
///
/// Returns one `Vec<Agent>` per synthesized household, in draw order.
pub fn synthesize(
    table: &HouseholdTable,
    target: usize,
    rng: &mut SimRng,
) -> PopulationResult<Vec<Vec<Agent>>> {
    if target == 0 {
        return Err(PopulationError::ZeroTarget);
    }
    table.validate()?;

    let pool = WeightedIndex::new(table.households.iter().map(|h| h.weight))
        .map_err(|_| PopulationError::ZeroWeight)?;

    let mut households = Vec::new();
    let mut n = 0usize;
    let mut replaced = 0usize;
    while n < target {
        let record = &table.households[pool.sample(rng.inner())];
        let members: Vec<Agent> = record
            .persons
            .iter()
            .map(|p| {
                let sector = Sector::from_division(p.division).unwrap_or_else(|| {
                    replaced += 1;
                    Sector::random(rng)
                });
                Agent::new(demographics(record.id, p, sector))
            })
            .collect();
        n += members.len();
        households.push(members);
    }

    debug!(
        "synthesized {} agents in {} households (target {}, {} sector codes replaced)",
        n,
        households.len(),
        target,
        replaced
    );
    Ok(households)
}

fn demographics(household: u64, p: &PersonRecord, sector: Sector) -> Demographics {
    Demographics {
        person_id: p.person_id,
        source_household: household,
        age: p.age,
        gender: Gender::from_code(p.gender),
        sector,
        work_hours: p.work_hours.max(0.0),
        shopping_hours: p.shopping_hours.max(0.0),
        student: p.student,
    }
}
