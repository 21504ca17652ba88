//! Portal Unlock - Per (user, portal) unlock record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PortalName;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalUnlock {
    pub id: Uuid,
    pub user_id: Uuid,
    pub portal: PortalName,
    pub unlocked: bool,
    pub unlocked_at: DateTime<Utc>,
}

impl PortalUnlock {
    pub fn new(user_id: Uuid, portal: PortalName) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            portal,
            unlocked: true,
            unlocked_at: Utc::now(),
        }
    }
}
