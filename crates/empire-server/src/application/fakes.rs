//! In-memory port implementations for application tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use empire::{
    Alignment, ChatMessage, CompletionOptions, CompletionResponse, DomainError, LoreEntry,
    LoreRepository, MemoryRepository, MemoryShard, PortalRepository, PortalUnlock,
    Quest, QuestRepository, RelationRepository, SeasonRepository, SeasonalEvent, ShardRepository,
    TextGenerator, TokenUsage, Twin, TwinMemory, TwinRelation, TwinRepository, TwinStats,
    Visibility,
};

#[derive(Default)]
pub struct InMemoryStore {
    twins: Mutex<HashMap<Uuid, Twin>>,
    stats: Mutex<Vec<TwinStats>>,
    shards: Mutex<Vec<MemoryShard>>,
    relations: Mutex<Vec<TwinRelation>>,
    quests: Mutex<Vec<Quest>>,
    seasons: Mutex<Vec<SeasonalEvent>>,
    lore: Mutex<Vec<LoreEntry>>,
    unlocks: Mutex<Vec<PortalUnlock>>,
    rituals: Mutex<Vec<Uuid>>,
    memories: Mutex<Vec<TwinMemory>>,
    quest_batches: AtomicUsize,
}

impl InMemoryStore {
    pub fn put_twin(&self, twin: Twin) {
        self.twins.lock().unwrap().insert(twin.id, twin);
    }

    pub fn twin(&self, id: Uuid) -> Option<Twin> {
        self.twins.lock().unwrap().get(&id).cloned()
    }

    pub fn stats(&self, twin_id: Uuid) -> Option<TwinStats> {
        self.stats
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.twin_id == twin_id)
            .cloned()
    }

    /// Every stats row for a twin, in insertion order
    pub fn stats_rows_of(&self, twin_id: Uuid) -> Vec<TwinStats> {
        self.stats
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.twin_id == twin_id)
            .cloned()
            .collect()
    }

    pub fn put_shard(&self, shard: MemoryShard) {
        self.shards.lock().unwrap().push(shard);
    }

    pub fn shards_of(&self, twin_id: Uuid) -> Vec<MemoryShard> {
        self.shards
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.twin_id == twin_id)
            .cloned()
            .collect()
    }

    pub fn put_quest(&self, quest: Quest) {
        self.quests.lock().unwrap().push(quest);
    }

    pub fn quests_of(&self, twin_id: Uuid) -> Vec<Quest> {
        self.quests
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.twin_id == twin_id)
            .cloned()
            .collect()
    }

    pub fn quest_batches(&self) -> usize {
        self.quest_batches.load(Ordering::SeqCst)
    }

    pub fn relations(&self) -> Vec<TwinRelation> {
        self.relations.lock().unwrap().clone()
    }

    pub fn put_season(&self, event: SeasonalEvent) {
        self.seasons.lock().unwrap().push(event);
    }

    /// Move the end date of every active event into the past
    pub fn expire_active_seasons(&self) {
        for event in self.seasons.lock().unwrap().iter_mut().filter(|e| e.is_active) {
            event.end_date = Utc::now() - chrono::Duration::days(1);
        }
    }

    pub fn seasons(&self) -> Vec<SeasonalEvent> {
        self.seasons.lock().unwrap().clone()
    }

    pub fn lore_of(&self, twin_id: Uuid) -> Vec<LoreEntry> {
        self.lore
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.twin_id == twin_id)
            .cloned()
            .collect()
    }

    pub fn add_ritual(&self, user_id: Uuid) {
        self.rituals.lock().unwrap().push(user_id);
    }

    pub fn unlocks(&self) -> Vec<PortalUnlock> {
        self.unlocks.lock().unwrap().clone()
    }

    pub fn memories_of(&self, twin_id: Uuid) -> Vec<TwinMemory> {
        self.memories
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.twin_id == twin_id)
            .cloned()
            .collect()
    }
}

/// Insert a level-1 twin with the given alignment text and tone
pub fn seed_twin(store: &InMemoryStore, alignment: &str, tone: &str) -> Twin {
    let mut twin = Twin::new(
        Uuid::new_v4(),
        format!("{}-{}", alignment, tone),
        Alignment::Neutral,
        tone.to_string(),
        "A reflection waiting to grow.".to_string(),
    );
    twin.alignment = alignment.to_string();
    store.put_twin(twin.clone());
    twin
}

fn missing_twin(id: Uuid) -> DomainError {
    DomainError::not_found("Twin", id)
}

#[async_trait]
impl TwinRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Twin>, DomainError> {
        Ok(self.twin(id))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Twin>, DomainError> {
        Ok(self
            .twins
            .lock()
            .unwrap()
            .values()
            .find(|t| t.user_id == user_id)
            .cloned())
    }

    async fn find_active(&self) -> Result<Vec<Twin>, DomainError> {
        Ok(self
            .twins
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.is_active)
            .cloned()
            .collect())
    }

    async fn create(&self, twin: &Twin) -> Result<Twin, DomainError> {
        self.put_twin(twin.clone());
        Ok(twin.clone())
    }

    async fn update_progress(
        &self,
        id: Uuid,
        level: i32,
        xp: i32,
        traits: &[String],
    ) -> Result<Twin, DomainError> {
        let mut twins = self.twins.lock().unwrap();
        let twin = twins.get_mut(&id).ok_or_else(|| missing_twin(id))?;
        twin.level = level;
        twin.xp = xp;
        twin.traits = traits.to_vec();
        Ok(twin.clone())
    }

    async fn update_level_xp(&self, id: Uuid, level: i32, xp: i32) -> Result<(), DomainError> {
        let mut twins = self.twins.lock().unwrap();
        let twin = twins.get_mut(&id).ok_or_else(|| missing_twin(id))?;
        twin.level = level;
        twin.xp = xp;
        Ok(())
    }

    async fn update_personality(&self, id: Uuid, personality: &str) -> Result<Twin, DomainError> {
        let mut twins = self.twins.lock().unwrap();
        let twin = twins.get_mut(&id).ok_or_else(|| missing_twin(id))?;
        twin.personality = personality.to_string();
        Ok(twin.clone())
    }

    async fn update_visibility(
        &self,
        id: Uuid,
        visibility: Visibility,
    ) -> Result<Twin, DomainError> {
        let mut twins = self.twins.lock().unwrap();
        let twin = twins.get_mut(&id).ok_or_else(|| missing_twin(id))?;
        twin.visibility = visibility;
        Ok(twin.clone())
    }

    async fn find_stats(&self, twin_id: Uuid) -> Result<Option<TwinStats>, DomainError> {
        Ok(self.stats(twin_id))
    }

    async fn create_stats(&self, twin_id: Uuid) -> Result<TwinStats, DomainError> {
        let stats = TwinStats::new_for_twin(twin_id);
        self.stats.lock().unwrap().push(stats.clone());
        Ok(stats)
    }

    async fn save_stats(&self, stats: &TwinStats) -> Result<TwinStats, DomainError> {
        let mut all = self.stats.lock().unwrap();
        match all.iter_mut().find(|s| s.id == stats.id) {
            Some(existing) => *existing = stats.clone(),
            None => all.push(stats.clone()),
        }
        Ok(stats.clone())
    }
}

#[async_trait]
impl ShardRepository for InMemoryStore {
    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<MemoryShard>, DomainError> {
        Ok(self.shards_of(twin_id))
    }

    async fn insert(&self, shard: &MemoryShard) -> Result<MemoryShard, DomainError> {
        self.put_shard(shard.clone());
        Ok(shard.clone())
    }

    async fn insert_many(&self, shards: &[MemoryShard]) -> Result<usize, DomainError> {
        self.shards.lock().unwrap().extend_from_slice(shards);
        Ok(shards.len())
    }

    async fn update(&self, shard: &MemoryShard) -> Result<MemoryShard, DomainError> {
        let mut all = self.shards.lock().unwrap();
        let existing = all
            .iter_mut()
            .find(|s| s.id == shard.id)
            .ok_or_else(|| DomainError::not_found("MemoryShard", shard.id))?;
        *existing = shard.clone();
        Ok(shard.clone())
    }
}

#[async_trait]
impl RelationRepository for InMemoryStore {
    async fn upsert(&self, relation: &TwinRelation) -> Result<TwinRelation, DomainError> {
        let mut all = self.relations.lock().unwrap();
        all.retain(|r| {
            !(r.twin_id == relation.twin_id && r.target_twin_id == relation.target_twin_id)
        });
        all.push(relation.clone());
        Ok(relation.clone())
    }

    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<TwinRelation>, DomainError> {
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.twin_id == twin_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuestRepository for InMemoryStore {
    async fn find_unexpired(
        &self,
        twin_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Quest>, DomainError> {
        Ok(self
            .quests_of(twin_id)
            .into_iter()
            .filter(|q| q.expires_at > now)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Quest>, DomainError> {
        Ok(self
            .quests
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn insert_many(&self, quests: &[Quest]) -> Result<Vec<Quest>, DomainError> {
        self.quest_batches.fetch_add(1, Ordering::SeqCst);
        self.quests.lock().unwrap().extend_from_slice(quests);
        Ok(quests.to_vec())
    }

    async fn mark_completed(&self, id: Uuid) -> Result<Quest, DomainError> {
        let mut all = self.quests.lock().unwrap();
        let quest = all
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| DomainError::not_found("Quest", id))?;
        quest.completed = true;
        Ok(quest.clone())
    }
}

#[async_trait]
impl SeasonRepository for InMemoryStore {
    async fn find_active(&self) -> Result<Option<SeasonalEvent>, DomainError> {
        Ok(self
            .seasons
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.is_active)
            .cloned())
    }

    async fn find_latest(&self) -> Result<Option<SeasonalEvent>, DomainError> {
        Ok(self
            .seasons
            .lock()
            .unwrap()
            .iter()
            .max_by_key(|e| e.created_at)
            .cloned())
    }

    async fn deactivate(&self, id: Uuid) -> Result<(), DomainError> {
        if let Some(event) = self.seasons.lock().unwrap().iter_mut().find(|e| e.id == id) {
            event.is_active = false;
        }
        Ok(())
    }

    async fn insert(&self, event: &SeasonalEvent) -> Result<SeasonalEvent, DomainError> {
        self.put_season(event.clone());
        Ok(event.clone())
    }
}

#[async_trait]
impl LoreRepository for InMemoryStore {
    async fn insert(&self, entry: &LoreEntry) -> Result<LoreEntry, DomainError> {
        self.lore.lock().unwrap().push(entry.clone());
        Ok(entry.clone())
    }

    async fn find_by_twin(&self, twin_id: Uuid) -> Result<Vec<LoreEntry>, DomainError> {
        let mut entries = self.lore_of(twin_id);
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }
}

#[async_trait]
impl PortalRepository for InMemoryStore {
    async fn has_completed_ritual(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.rituals.lock().unwrap().contains(&user_id))
    }

    async fn upsert_unlock(&self, unlock: &PortalUnlock) -> Result<PortalUnlock, DomainError> {
        let mut all = self.unlocks.lock().unwrap();
        all.retain(|u| !(u.user_id == unlock.user_id && u.portal == unlock.portal));
        all.push(unlock.clone());
        Ok(unlock.clone())
    }
}

#[async_trait]
impl MemoryRepository for InMemoryStore {
    async fn add(&self, memory: &TwinMemory) -> Result<TwinMemory, DomainError> {
        self.memories.lock().unwrap().push(memory.clone());
        Ok(memory.clone())
    }

    async fn recent(&self, twin_id: Uuid, limit: i64) -> Result<Vec<TwinMemory>, DomainError> {
        let mut memories = self.memories_of(twin_id);
        memories.reverse();
        memories.truncate(limit.max(0) as usize);
        Ok(memories)
    }
}

/// Text generator that returns a fixed reply or a fixed error
pub struct ScriptedGenerator {
    reply: Result<String, fn() -> DomainError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<Vec<ChatMessage>>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        let make: fn() -> DomainError = match error {
            DomainError::RateLimited => || DomainError::RateLimited,
            DomainError::QuotaExhausted => || DomainError::QuotaExhausted,
            _ => || DomainError::ExternalService("upstream returned 500".to_string()),
        };
        Self {
            reply: Err(make),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<Vec<ChatMessage>> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(messages.to_vec());
        match &self.reply {
            Ok(content) => Ok(CompletionResponse {
                content: content.clone(),
                model: "scripted".to_string(),
                usage: TokenUsage::default(),
            }),
            Err(make) => Err(make()),
        }
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}
