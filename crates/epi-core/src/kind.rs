//! Closed tag sets shared across crates.

use std::fmt;

// ── LocationKind ──────────────────────────────────────────────────────────────

/// Type tag of a grid cell.
///
/// Every cell starts as `Street`.  A building claims it once and the tag is
/// then fixed for the rest of the replication.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationKind {
    #[default]
    Street,
    Home,
    School,
    Kindergarten,
    University,
    Supermarket,
    /// A firm of the given NACE section (1..=21).
    Workplace(u8),
}

impl LocationKind {
    #[inline]
    pub fn is_street(self) -> bool {
        matches!(self, LocationKind::Street)
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationKind::Street => f.write_str("street"),
            LocationKind::Home => f.write_str("home"),
            LocationKind::School => f.write_str("school"),
            LocationKind::Kindergarten => f.write_str("kindergarten"),
            LocationKind::University => f.write_str("university"),
            LocationKind::Supermarket => f.write_str("supermarket"),
            LocationKind::Workplace(section) => write!(f, "firm{section}"),
        }
    }
}

// ── ActivityKind ──────────────────────────────────────────────────────────────

/// The daily activities an agent can be engaged in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityKind {
    /// Working hours, spent either at the workplace or at home.
    AtWork,
    AtSchool,
    AtKindergarten,
    AtUniversity,
    Shopping,
}

impl ActivityKind {
    pub fn name(self) -> &'static str {
        match self {
            ActivityKind::AtWork => "at_work",
            ActivityKind::AtSchool => "at_school",
            ActivityKind::AtKindergarten => "at_kindergarten",
            ActivityKind::AtUniversity => "at_university",
            ActivityKind::Shopping => "shopping",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
