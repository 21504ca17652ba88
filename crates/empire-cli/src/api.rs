//! Empire API Client

use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// API Client for Empire
pub struct EmpireClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub personality: String,
    pub alignment: String,
    pub tone: String,
    pub traits: Vec<String>,
    pub level: i32,
    pub xp: i32,
    pub visibility: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinStatsResponse {
    pub xp: i32,
    pub level: i32,
    pub wisdom: i32,
    pub chaos: i32,
    pub clarity: i32,
    pub shadow: i32,
    pub harmony: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestResponse {
    pub id: Uuid,
    pub quest_text: String,
    pub xp_reward: i32,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignQuestsResponse {
    pub assigned: bool,
    pub quests: Vec<QuestResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuestResponse {
    pub quest: QuestResponse,
    pub xp_pending: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardResponse {
    pub shard_type: String,
    pub value: String,
    pub rarity: String,
    pub xp: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolveShardsResponse {
    pub xp_gained: i32,
    pub promoted: usize,
    pub shards: Vec<ShardResponse>,
    pub new_shard: Option<ShardResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpResponse {
    pub leveled_up: bool,
    pub previous_level: i32,
    pub level: i32,
    pub xp: i32,
    #[serde(default)]
    pub new_traits: Vec<String>,
    pub personality: Option<String>,
    #[serde(default)]
    pub attributes_raised: Vec<String>,
    pub new_shard: Option<ShardResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationResponse {
    pub target_twin_id: Uuid,
    pub relation_type: String,
    pub strength: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationScoreBreakdown {
    pub alignment_score: f64,
    pub tone_score: f64,
    pub trait_score: f64,
    pub total_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct ComputeRelationResponse {
    pub relation: RelationResponse,
    pub score: RelationScoreBreakdown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonResponse {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRotationResponse {
    pub rotated: bool,
    pub event: SeasonResponse,
    pub ended_event: Option<SeasonResponse>,
    pub shards_granted: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockPortalResponse {
    pub success: bool,
    pub portal: String,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoreResponse {
    pub level: i32,
    pub entry: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprintResponse {
    pub xp_pending: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainResponse {
    pub twin: TwinResponse,
    pub xp_pending: i32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ============================================
// API Request Types
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTwinRequest<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
    pub alignment: &'a str,
    pub tone: &'a str,
    pub personality: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TwinIdRequest<'a> {
    twin_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VisibilityRequest<'a> {
    twin_id: &'a str,
    visibility: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteQuestRequest<'a> {
    quest_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvolveShardsRequest<'a> {
    twin_id: &'a str,
    context: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GrantXpRequest<'a> {
    twin_id: &'a str,
    xp_gain: i32,
    source: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelationRequest<'a> {
    twin_id: &'a str,
    target_twin_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnlockPortalRequest<'a> {
    user_id: &'a str,
    portal: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateLoreRequest<'a> {
    twin_id: &'a str,
    level: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImprintRequest<'a> {
    twin_id: &'a str,
    content: &'a str,
}

/// Which leveling handler to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LevelingPolicy {
    /// `/evolve-twin`: direct threshold table, traits, personality rewrite
    Direct,
    /// `/twin-level-up`: stats table, attribute raises, level-up shard
    Stats,
}

impl LevelingPolicy {
    fn path(self) -> &'static str {
        match self {
            Self::Direct => "/evolve-twin",
            Self::Stats => "/twin-level-up",
        }
    }
}

impl EmpireClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let resp = request
            .send()
            .await
            .context("Failed to connect to Empire API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            bail!("API error ({}): {}", status, message);
        }

        resp.json().await.context("Failed to parse response")
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        tracing::debug!("GET {}", path);
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        tracing::debug!("POST {}", path);
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    // Twins

    pub async fn create_twin(&self, request: &CreateTwinRequest<'_>) -> Result<TwinResponse> {
        self.post("/twins", request).await
    }

    pub async fn get_twin(&self, twin_id: &str) -> Result<TwinResponse> {
        self.get(&format!("/twins/{}", twin_id)).await
    }

    pub async fn get_stats(&self, twin_id: &str) -> Result<TwinStatsResponse> {
        self.get(&format!("/twins/{}/stats", twin_id)).await
    }

    pub async fn set_visibility(&self, twin_id: &str, visibility: &str) -> Result<TwinResponse> {
        self.post(
            "/twin-visibility",
            &VisibilityRequest {
                twin_id,
                visibility,
            },
        )
        .await
    }

    // Quests

    pub async fn assign_quests(&self, twin_id: &str) -> Result<AssignQuestsResponse> {
        self.post("/assign-daily-quests", &TwinIdRequest { twin_id })
            .await
    }

    pub async fn list_quests(&self, twin_id: &str) -> Result<Vec<QuestResponse>> {
        self.get(&format!("/twins/{}/quests", twin_id)).await
    }

    pub async fn complete_quest(&self, quest_id: &str) -> Result<CompleteQuestResponse> {
        self.post("/complete-quest", &CompleteQuestRequest { quest_id })
            .await
    }

    // Shards

    pub async fn evolve_shards(&self, twin_id: &str, context: &str) -> Result<EvolveShardsResponse> {
        self.post("/evolve-memory-shards", &EvolveShardsRequest { twin_id, context })
            .await
    }

    pub async fn list_shards(&self, twin_id: &str) -> Result<Vec<ShardResponse>> {
        self.get(&format!("/twins/{}/shards", twin_id)).await
    }

    // Leveling

    pub async fn grant_xp(
        &self,
        policy: LevelingPolicy,
        twin_id: &str,
        xp_gain: i32,
        source: &str,
    ) -> Result<LevelUpResponse> {
        self.post(
            policy.path(),
            &GrantXpRequest {
                twin_id,
                xp_gain,
                source,
            },
        )
        .await
    }

    // Relations

    pub async fn compute_relation(
        &self,
        twin_id: &str,
        target_twin_id: &str,
    ) -> Result<ComputeRelationResponse> {
        self.post(
            "/twin-relations",
            &RelationRequest {
                twin_id,
                target_twin_id,
            },
        )
        .await
    }

    pub async fn list_relations(&self, twin_id: &str) -> Result<Vec<RelationResponse>> {
        self.get(&format!("/twins/{}/relations", twin_id)).await
    }

    // Seasons

    pub async fn rotate_season(&self) -> Result<SeasonRotationResponse> {
        self.post("/seasonal-event-rotation", &serde_json::json!({}))
            .await
    }

    pub async fn current_season(&self) -> Result<Option<SeasonResponse>> {
        self.get("/seasonal-event").await
    }

    // Portals

    pub async fn unlock_portal(&self, user_id: &str, portal: &str) -> Result<UnlockPortalResponse> {
        self.post("/unlock-portal", &UnlockPortalRequest { user_id, portal })
            .await
    }

    // Lore

    pub async fn generate_lore(&self, twin_id: &str, level: i32) -> Result<LoreResponse> {
        self.post("/generate-lore", &GenerateLoreRequest { twin_id, level })
            .await
    }

    pub async fn list_lore(&self, twin_id: &str) -> Result<Vec<LoreResponse>> {
        self.get(&format!("/twins/{}/lore", twin_id)).await
    }

    // Training

    pub async fn imprint(&self, twin_id: &str, content: &str) -> Result<ImprintResponse> {
        self.post("/imprint-memory", &ImprintRequest { twin_id, content })
            .await
    }

    pub async fn train(&self, twin_id: &str) -> Result<TrainResponse> {
        self.post("/train-twin", &TwinIdRequest { twin_id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = EmpireClient::new("http://localhost:8000/");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn test_policy_paths() {
        assert_eq!(LevelingPolicy::Direct.path(), "/evolve-twin");
        assert_eq!(LevelingPolicy::Stats.path(), "/twin-level-up");
    }

    #[test]
    fn test_grant_request_is_camel_case() {
        let body = serde_json::to_value(GrantXpRequest {
            twin_id: "abc",
            xp_gain: 120,
            source: "cli",
        })
        .unwrap();
        assert_eq!(body["twinId"], "abc");
        assert_eq!(body["xpGain"], 120);
    }

    #[test]
    fn test_level_up_response_parses() {
        let json = r#"{
            "twinId": "5f0c4f3e-2b8a-4c55-9b3e-0d6a7a1c2b11",
            "leveledUp": true,
            "previousLevel": 1,
            "level": 3,
            "xp": 260,
            "levelsGained": [2, 3],
            "newTraits": ["Curious", "Empathic"],
            "personality": null,
            "attributesRaised": [],
            "newShard": null
        }"#;
        let resp: LevelUpResponse = serde_json::from_str(json).unwrap();
        assert!(resp.leveled_up);
        assert_eq!(resp.new_traits, vec!["Curious", "Empathic"]);
        assert!(resp.new_shard.is_none());
    }
}
