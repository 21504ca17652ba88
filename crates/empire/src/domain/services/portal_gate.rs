//! Portal unlock requirements
//!
//! Checks run in a fixed order (level, ritual, season) and stop at the first
//! failure so that later lookups are only made when needed.

use serde::Serialize;

use crate::domain::tables::PortalRequirements;
use crate::domain::value_objects::{PortalName, SeasonName};

/// Why a portal stayed closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateDenial {
    Level { required: i32, current: i32 },
    Ritual,
    Season { required: SeasonName },
}

impl GateDenial {
    pub fn reason(&self, portal: PortalName) -> String {
        match self {
            GateDenial::Level { required, current } => format!(
                "{} requires twin level {} (current level {})",
                portal, required, current
            ),
            GateDenial::Ritual => format!("{} requires a completed ritual", portal),
            GateDenial::Season { required } => format!(
                "{} only opens during the season \"{}\"",
                portal, required
            ),
        }
    }
}

pub fn check_level(requirements: &PortalRequirements, twin_level: i32) -> Result<(), GateDenial> {
    if twin_level < requirements.min_level {
        return Err(GateDenial::Level {
            required: requirements.min_level,
            current: twin_level,
        });
    }
    Ok(())
}

pub fn check_ritual(requirements: &PortalRequirements, has_ritual: bool) -> Result<(), GateDenial> {
    if requirements.requires_ritual && !has_ritual {
        return Err(GateDenial::Ritual);
    }
    Ok(())
}

/// `active_season` is the name of the currently active event, if any
pub fn check_season(
    requirements: &PortalRequirements,
    active_season: Option<&str>,
) -> Result<(), GateDenial> {
    match requirements.required_season {
        Some(required) if active_season != Some(required.as_str()) => {
            Err(GateDenial::Season { required })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tables::portal_requirements;

    #[test]
    fn test_starforge_without_season_cites_season() {
        let req = portal_requirements(PortalName::Starforge);
        assert!(check_level(&req, 10).is_ok());
        assert!(check_ritual(&req, false).is_ok());
        let denial = check_season(&req, None).unwrap_err();
        let reason = denial.reason(PortalName::Starforge);
        assert!(reason.contains("The Eclipse Convergence"));
    }

    #[test]
    fn test_wrong_active_season() {
        let req = portal_requirements(PortalName::Starforge);
        assert!(check_season(&req, Some("The Shadow Harvest")).is_err());
        assert!(check_season(&req, Some("The Eclipse Convergence")).is_ok());
    }

    #[test]
    fn test_level_denial() {
        let req = portal_requirements(PortalName::Shadowgate);
        assert_eq!(
            check_level(&req, 4),
            Err(GateDenial::Level {
                required: 5,
                current: 4
            })
        );
    }

    #[test]
    fn test_ritual_only_when_required() {
        let moonwell = portal_requirements(PortalName::Moonwell);
        let shadowgate = portal_requirements(PortalName::Shadowgate);
        assert!(check_ritual(&moonwell, false).is_ok());
        assert_eq!(check_ritual(&shadowgate, false), Err(GateDenial::Ritual));
        assert!(check_ritual(&shadowgate, true).is_ok());
    }
}
