//! Economic sector codes (NACE Rev. 2).
//!
//! A person's sector is stored as its two-digit *division*.  Work-from-home
//! feasibility is tabulated per division; lockdown and short-time-work
//! rates, and the workplaces themselves, per *section* (1 = A .. 21 = U).

use std::fmt;

use crate::SimRng;

/// Every division code that exists in NACE Rev. 2, ascending.
pub const DIVISIONS: &[u8] = &[
    1, 2, 3, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 31, 32, 33, 35, 36, 37, 38, 39, 41, 42, 43, 45, 46, 47, 49, 50, 51, 52, 53,
    55, 56, 58, 59, 60, 61, 62, 63, 64, 65, 66, 68, 69, 70, 71, 72, 73, 74, 75, 77, 78, 79, 80,
    81, 82, 84, 85, 86, 87, 88, 90, 91, 92, 93, 94, 95, 96, 97, 98, 99,
];

/// Number of NACE sections.
pub const N_SECTIONS: u8 = 21;

/// A validated NACE division.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector {
    division: u8,
}

impl Sector {
    /// `None` unless `code` is one of [`DIVISIONS`].
    pub fn from_division(code: i32) -> Option<Sector> {
        let division = u8::try_from(code).ok()?;
        DIVISIONS
            .binary_search(&division)
            .ok()
            .map(|_| Sector { division })
    }

    /// Uniform draw over all valid divisions.
    pub fn random(rng: &mut SimRng) -> Sector {
        let division = DIVISIONS[rng.gen_range(0..DIVISIONS.len())];
        Sector { division }
    }

    #[inline]
    pub fn division(self) -> u8 {
        self.division
    }

    /// Section number, 1 (A, agriculture) through 21 (U, extraterritorial).
    pub fn section(self) -> u8 {
        match self.division {
            1..=3 => 1,
            5..=9 => 2,
            10..=33 => 3,
            35 => 4,
            36..=39 => 5,
            41..=43 => 6,
            45..=47 => 7,
            49..=53 => 8,
            55..=56 => 9,
            58..=63 => 10,
            64..=66 => 11,
            68 => 12,
            69..=75 => 13,
            77..=82 => 14,
            84 => 15,
            85 => 16,
            86..=88 => 17,
            90..=93 => 18,
            94..=96 => 19,
            97..=98 => 20,
            _ => 21,
        }
    }

    /// Section letter, `'A'` through `'U'`.
    pub fn section_letter(self) -> char {
        (b'A' + self.section() - 1) as char
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.section_letter(), self.division)
    }
}
