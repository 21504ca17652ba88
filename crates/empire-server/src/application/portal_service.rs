//! Portal Application Service
//!
//! Checks a user's twin against the fixed portal requirements and records
//! the unlock when every check passes.

use std::sync::Arc;

use empire::domain::services::portal_gate::{self, GateDenial};
use empire::domain::tables;
use empire::{
    DomainError, PortalName, PortalRepository, PortalUnlock, SeasonRepository, TwinRepository,
};
use uuid::Uuid;

/// A closed gate is a regular outcome, not an error
#[derive(Debug, Clone)]
pub enum PortalDecision {
    Unlocked(PortalUnlock),
    Denied { portal: PortalName, denial: GateDenial },
}

impl PortalDecision {
    pub fn reason(&self) -> Option<String> {
        match self {
            PortalDecision::Unlocked(_) => None,
            PortalDecision::Denied { portal, denial } => Some(denial.reason(*portal)),
        }
    }
}

pub struct PortalService<P: PortalRepository, T: TwinRepository, E: SeasonRepository> {
    portals: Arc<P>,
    twins: Arc<T>,
    seasons: Arc<E>,
}

impl<P: PortalRepository, T: TwinRepository, E: SeasonRepository> PortalService<P, T, E> {
    pub fn new(portals: Arc<P>, twins: Arc<T>, seasons: Arc<E>) -> Self {
        Self {
            portals,
            twins,
            seasons,
        }
    }

    /// `portal` is the raw name from the request; unknown names are InvalidInput
    pub async fn unlock(&self, user_id: Uuid, portal: &str) -> Result<PortalDecision, DomainError> {
        let portal: PortalName = portal.parse().map_err(DomainError::InvalidInput)?;
        let requirements = tables::portal_requirements(portal);

        let twin = self
            .twins
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found_str("Twin for user", &user_id.to_string()))?;

        if let Err(denial) = portal_gate::check_level(&requirements, twin.level) {
            return Ok(Self::denied(portal, denial));
        }

        if requirements.requires_ritual {
            let has_ritual = self.portals.has_completed_ritual(user_id).await?;
            if let Err(denial) = portal_gate::check_ritual(&requirements, has_ritual) {
                return Ok(Self::denied(portal, denial));
            }
        }

        if requirements.required_season.is_some() {
            let active = self.seasons.find_active().await?;
            let active_name = active.as_ref().map(|e| e.name.as_str());
            if let Err(denial) = portal_gate::check_season(&requirements, active_name) {
                return Ok(Self::denied(portal, denial));
            }
        }

        let unlock = self
            .portals
            .upsert_unlock(&PortalUnlock::new(user_id, portal))
            .await?;

        tracing::info!("🌀 {} unlocked {}", twin.username, portal);

        Ok(PortalDecision::Unlocked(unlock))
    }

    fn denied(portal: PortalName, denial: GateDenial) -> PortalDecision {
        tracing::info!("🚪 {} stays closed: {}", portal, denial.reason(portal));
        PortalDecision::Denied { portal, denial }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{seed_twin, InMemoryStore};
    use chrono::{Duration, Utc};
    use empire::{SeasonName, SeasonalEvent, Twin};

    fn service(store: &Arc<InMemoryStore>) -> PortalService<InMemoryStore, InMemoryStore, InMemoryStore> {
        PortalService::new(store.clone(), store.clone(), store.clone())
    }

    fn twin_at_level(store: &InMemoryStore, level: i32) -> Twin {
        let mut twin = seed_twin(store, "neutral", "calm");
        twin.level = level;
        store.put_twin(twin.clone());
        twin
    }

    fn active_season(store: &InMemoryStore, season: SeasonName) {
        store.put_season(SeasonalEvent::new(
            season,
            Utc::now(),
            Duration::days(90),
            serde_json::json!({}),
        ));
    }

    #[tokio::test]
    async fn test_starforge_without_season_is_denied_citing_season() {
        let store = Arc::new(InMemoryStore::default());
        let twin = twin_at_level(&store, 10);

        let decision = service(&store).unlock(twin.user_id, "Starforge").await.unwrap();

        let reason = decision.reason().unwrap();
        assert!(reason.contains("The Eclipse Convergence"));
        assert!(store.unlocks().is_empty());
    }

    #[tokio::test]
    async fn test_starforge_during_convergence_unlocks() {
        let store = Arc::new(InMemoryStore::default());
        let twin = twin_at_level(&store, 9);
        active_season(&store, SeasonName::EclipseConvergence);

        let decision = service(&store).unlock(twin.user_id, "Starforge").await.unwrap();

        assert!(matches!(decision, PortalDecision::Unlocked(_)));
        assert_eq!(store.unlocks().len(), 1);
    }

    #[tokio::test]
    async fn test_level_is_checked_before_ritual() {
        let store = Arc::new(InMemoryStore::default());
        let twin = twin_at_level(&store, 2);

        let decision = service(&store).unlock(twin.user_id, "Shadowgate").await.unwrap();

        match decision {
            PortalDecision::Denied { denial, .. } => assert_eq!(
                denial,
                GateDenial::Level {
                    required: 5,
                    current: 2
                }
            ),
            other => panic!("expected denial, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ritual_requirement() {
        let store = Arc::new(InMemoryStore::default());
        let twin = twin_at_level(&store, 5);
        let service = service(&store);

        let denied = service.unlock(twin.user_id, "Shadowgate").await.unwrap();
        assert!(matches!(
            denied,
            PortalDecision::Denied {
                denial: GateDenial::Ritual,
                ..
            }
        ));

        store.add_ritual(twin.user_id);
        let unlocked = service.unlock(twin.user_id, "Shadowgate").await.unwrap();
        assert!(matches!(unlocked, PortalDecision::Unlocked(_)));
    }

    #[tokio::test]
    async fn test_repeat_unlock_upserts() {
        let store = Arc::new(InMemoryStore::default());
        let twin = twin_at_level(&store, 3);
        let service = service(&store);

        service.unlock(twin.user_id, "Moonwell").await.unwrap();
        service.unlock(twin.user_id, "Moonwell").await.unwrap();

        assert_eq!(store.unlocks().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_portal_is_invalid_input() {
        let store = Arc::new(InMemoryStore::default());
        let twin = twin_at_level(&store, 10);

        assert!(matches!(
            service(&store).unlock(twin.user_id, "Sunwell").await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_user_without_twin_is_not_found() {
        let store = Arc::new(InMemoryStore::default());

        assert!(matches!(
            service(&store).unlock(Uuid::new_v4(), "Moonwell").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
