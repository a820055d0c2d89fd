//! Synthetic microdata for demos and tests.
//!
//! Produces a household table with a plausible mix of single adults,
//! couples and families.  Not drawn from any survey; use
//! [`load_households_csv`](crate::load_households_csv) for real input.

use epi_core::SimRng;
use epi_core::sector::DIVISIONS;

use crate::{HouseholdRecord, HouseholdTable, PersonRecord};

/// Daily hours of a full-time worker.
const FULL_TIME_HOURS_PER_DAY: f32 = 8.0;
const RETIREMENT_AGE: u8 = 65;

/// A table of `n_households` households drawn from `seed`.
///
/// Sampling weights lie in `1..=5`.  Non-workers carry division `-1`, so
/// synthesis replaces their sector with a random one.
pub fn sample_table(n_households: usize, seed: u64) -> HouseholdTable {
    let mut rng = SimRng::new(seed);
    let mut next_person = 1u64;
    let households = (1..=n_households as u64)
        .map(|id| {
            let mut ages = vec![rng.gen_range(20..=85u8)];
            match rng.gen_range(0..4u8) {
                0 => {}
                1 => ages.push(rng.gen_range(20..=85u8)),
                _ => {
                    let parent = rng.gen_range(25..=50u8);
                    ages[0] = parent;
                    ages.push(parent.saturating_add(rng.gen_range(0..=4u8)));
                    for _ in 0..rng.gen_range(1..=3u8) {
                        ages.push(rng.gen_range(0..=19u8));
                    }
                }
            }
            let persons = ages
                .into_iter()
                .map(|age| {
                    let person = sample_person(next_person, age, &mut rng);
                    next_person += 1;
                    person
                })
                .collect();
            HouseholdRecord {
                id,
                weight: rng.gen_range(1..=5u32),
                persons,
            }
        })
        .collect();
    HouseholdTable::new(households)
}

fn sample_person(person_id: u64, age: u8, rng: &mut SimRng) -> PersonRecord {
    let working_age = (18..RETIREMENT_AGE).contains(&age);
    let student = (19..=29).contains(&age) && rng.gen_bool(0.3);
    let worker = working_age && !student && rng.gen_bool(0.75);
    let division = if worker {
        let &division = rng.choose(DIVISIONS).unwrap_or(&47);
        i32::from(division)
    } else {
        -1
    };
    PersonRecord {
        person_id,
        age,
        gender: rng.gen_range(1..=2),
        division,
        work_hours: if worker {
            FULL_TIME_HOURS_PER_DAY * rng.gen_range(0.5..=1.0f32)
        } else {
            0.0
        },
        shopping_hours: 1.0,
        student,
    }
}
