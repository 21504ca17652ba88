//! SeasonName - The four cyclic seasonal events

use serde::{Deserialize, Serialize};

/// Seasons rotate in declaration order and wrap around.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeasonName {
    #[serde(rename = "The Awakening")]
    Awakening,
    #[serde(rename = "The Radiant Bloom")]
    RadiantBloom,
    #[serde(rename = "The Eclipse Convergence")]
    EclipseConvergence,
    #[serde(rename = "The Shadow Harvest")]
    ShadowHarvest,
}

impl SeasonName {
    pub const CYCLE: [SeasonName; 4] = [
        SeasonName::Awakening,
        SeasonName::RadiantBloom,
        SeasonName::EclipseConvergence,
        SeasonName::ShadowHarvest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonName::Awakening => "The Awakening",
            SeasonName::RadiantBloom => "The Radiant Bloom",
            SeasonName::EclipseConvergence => "The Eclipse Convergence",
            SeasonName::ShadowHarvest => "The Shadow Harvest",
        }
    }

    /// Season following the one named `previous`.
    /// No history, or a name outside the cycle, starts from the first season.
    pub fn successor_of(previous: Option<&str>) -> SeasonName {
        let index = previous.and_then(|name| Self::CYCLE.iter().position(|s| s.as_str() == name));
        match index {
            Some(i) => Self::CYCLE[(i + 1) % Self::CYCLE.len()],
            None => Self::CYCLE[0],
        }
    }
}

impl std::fmt::Display for SeasonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeasonName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CYCLE
            .iter()
            .copied()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| format!("Unknown season: {}", s))
    }
}
