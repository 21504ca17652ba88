//! StatAttribute - Named attributes on the twin_stats record

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatAttribute {
    Wisdom,
    Chaos,
    Clarity,
    Shadow,
    Harmony,
}

impl StatAttribute {
    pub const ALL: [StatAttribute; 5] = [
        StatAttribute::Wisdom,
        StatAttribute::Chaos,
        StatAttribute::Clarity,
        StatAttribute::Shadow,
        StatAttribute::Harmony,
    ];
}

impl std::fmt::Display for StatAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatAttribute::Wisdom => write!(f, "wisdom"),
            StatAttribute::Chaos => write!(f, "chaos"),
            StatAttribute::Clarity => write!(f, "clarity"),
            StatAttribute::Shadow => write!(f, "shadow"),
            StatAttribute::Harmony => write!(f, "harmony"),
        }
    }
}
