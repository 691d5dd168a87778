use std::{
    cmp::Ordering,
    fmt,
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
};

/// JLPT proficiency level. N5 is the easiest, N1 the hardest.
///
/// `Unknown` means "not in any list" and is deliberately left out of the
/// difficulty ordering: comparing it against a real tier yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProficiencyTier {
    N5,
    N4,
    N3,
    N2,
    N1,
    Unknown,
}

impl ProficiencyTier {
    /// Classified tiers, easiest first.
    pub const ORDERED: [ProficiencyTier; 5] = [
        ProficiencyTier::N5,
        ProficiencyTier::N4,
        ProficiencyTier::N3,
        ProficiencyTier::N2,
        ProficiencyTier::N1,
    ];

    fn rank(&self) -> Option<u8> {
        match self {
            ProficiencyTier::N5 => Some(0),
            ProficiencyTier::N4 => Some(1),
            ProficiencyTier::N3 => Some(2),
            ProficiencyTier::N2 => Some(3),
            ProficiencyTier::N1 => Some(4),
            ProficiencyTier::Unknown => None,
        }
    }

    /// Weight used by the sentence-level average (N1=5 .. N5=1, Unknown=0).
    pub fn weight(&self) -> u32 {
        self.rank().map(|rank| rank as u32 + 1).unwrap_or(0)
    }

    pub fn is_classified(&self) -> bool {
        self.rank().is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProficiencyTier::N5 => "N5",
            ProficiencyTier::N4 => "N4",
            ProficiencyTier::N3 => "N3",
            ProficiencyTier::N2 => "N2",
            ProficiencyTier::N1 => "N1",
            ProficiencyTier::Unknown => "Unknown",
        }
    }
}

impl PartialOrd for ProficiencyTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for ProficiencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProficiencyTier {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "N5" => Ok(ProficiencyTier::N5),
            "N4" => Ok(ProficiencyTier::N4),
            "N3" => Ok(ProficiencyTier::N3),
            "N2" => Ok(ProficiencyTier::N2),
            "N1" => Ok(ProficiencyTier::N1),
            "UNKNOWN" => Ok(ProficiencyTier::Unknown),
            other => Err(format!("Unrecognised JLPT level '{}'", other)),
        }
    }
}
