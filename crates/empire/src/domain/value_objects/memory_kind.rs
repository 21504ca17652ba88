//! MemoryKind - How a twin memory entry was created

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    #[default]
    Imprint,
    Training,
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryKind::Imprint => write!(f, "imprint"),
            MemoryKind::Training => write!(f, "training"),
        }
    }
}

impl std::str::FromStr for MemoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imprint" => Ok(MemoryKind::Imprint),
            "training" => Ok(MemoryKind::Training),
            _ => Err(format!("Unknown memory kind: {}", s)),
        }
    }
}
