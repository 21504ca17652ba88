//! PortalName - Named unlockable gates

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PortalName {
    Moonwell,
    Shadowgate,
    Dreamspire,
    Starforge,
}

impl PortalName {
    pub const ALL: [PortalName; 4] = [
        PortalName::Moonwell,
        PortalName::Shadowgate,
        PortalName::Dreamspire,
        PortalName::Starforge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PortalName::Moonwell => "Moonwell",
            PortalName::Shadowgate => "Shadowgate",
            PortalName::Dreamspire => "Dreamspire",
            PortalName::Starforge => "Starforge",
        }
    }
}

impl std::fmt::Display for PortalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PortalName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|portal| portal.as_str() == s)
            .ok_or_else(|| format!("Invalid portal: {}", s))
    }
}
