//! RelationType - Classification of a twin-to-twin edge

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Ally,
    Rival,
    #[default]
    Neutral,
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationType::Ally => write!(f, "ally"),
            RelationType::Rival => write!(f, "rival"),
            RelationType::Neutral => write!(f, "neutral"),
        }
    }
}

impl std::str::FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ally" => Ok(RelationType::Ally),
            "rival" => Ok(RelationType::Rival),
            "neutral" => Ok(RelationType::Neutral),
            _ => Err(format!("Unknown relation type: {}", s)),
        }
    }
}
