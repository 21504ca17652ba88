//! Daily quest draw

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::domain::entities::Quest;
use crate::domain::tables::{MAX_DAILY_QUESTS, MIN_DAILY_QUESTS, QUEST_POOL, QUEST_TTL_HOURS};

/// Shuffle the pool and take a prefix of 2 or 3 distinct quests
pub fn draw_daily_quests<R: Rng + ?Sized>(
    rng: &mut R,
    twin_id: Uuid,
    now: DateTime<Utc>,
) -> Vec<Quest> {
    let mut pool = QUEST_POOL.to_vec();
    pool.shuffle(rng);
    let count = rng.gen_range(MIN_DAILY_QUESTS..=MAX_DAILY_QUESTS);
    let ttl = Duration::hours(QUEST_TTL_HOURS);

    pool.into_iter()
        .take(count)
        .map(|template| Quest::new(twin_id, template.text, template.xp_reward, now, ttl))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_draw_sizes_and_uniqueness() {
        let mut rng = StdRng::seed_from_u64(3);
        let twin_id = Uuid::new_v4();
        let now = Utc::now();
        let mut sizes = HashSet::new();

        for _ in 0..100 {
            let quests = draw_daily_quests(&mut rng, twin_id, now);
            sizes.insert(quests.len());
            let texts: HashSet<_> = quests.iter().map(|q| q.quest_text.clone()).collect();
            assert_eq!(texts.len(), quests.len());
            for quest in &quests {
                assert_eq!(quest.twin_id, twin_id);
                assert!(!quest.completed);
                assert_eq!(quest.expires_at, now + Duration::days(1));
            }
        }

        assert_eq!(sizes, HashSet::from([2, 3]));
    }
}
