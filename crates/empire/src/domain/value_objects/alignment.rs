//! Alignment - Moral axis of a Twin

use serde::{Deserialize, Serialize};

/// Twin alignment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Radiant,
    #[default]
    Neutral,
    Shadow,
}

impl Alignment {
    /// Position on the 0..=100 axis used by relation scoring
    pub fn affinity_score(&self) -> f64 {
        match self {
            Alignment::Radiant => 100.0,
            Alignment::Neutral => 50.0,
            Alignment::Shadow => 0.0,
        }
    }

    /// Score for a stored alignment string. Unlisted values sit in the middle.
    pub fn score_of(raw: &str) -> f64 {
        match raw {
            "radiant" => Alignment::Radiant.affinity_score(),
            "neutral" => Alignment::Neutral.affinity_score(),
            "shadow" => Alignment::Shadow.affinity_score(),
            _ => 50.0,
        }
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::Radiant => write!(f, "radiant"),
            Alignment::Neutral => write!(f, "neutral"),
            Alignment::Shadow => write!(f, "shadow"),
        }
    }
}

impl std::str::FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "radiant" => Ok(Alignment::Radiant),
            "neutral" => Ok(Alignment::Neutral),
            "shadow" => Ok(Alignment::Shadow),
            _ => Err(format!("Unknown alignment: {}", s)),
        }
    }
}
