//! Memory shard evolution rules

use rand::Rng;
use uuid::Uuid;

use crate::domain::entities::MemoryShard;
use crate::domain::tables::{
    BASE_SHARD_XP, CONTEXT_XP_BONUSES, EPIC_SHARD_XP, MYTHIC_SHARD_XP, RARE_SHARD_XP,
    SPAWNED_SHARD_TYPES,
};
use crate::domain::value_objects::Rarity;

/// XP every shard receives for an activity described by `context`.
///
/// Matching is case-sensitive and each keyword adds its bonus independently.
pub fn xp_gain_for_context(context: &str) -> i32 {
    CONTEXT_XP_BONUSES
        .iter()
        .filter(|(keyword, _)| context.contains(keyword))
        .fold(BASE_SHARD_XP, |acc, (_, bonus)| acc + bonus)
}

/// Rarity after promotion checks at `xp`.
///
/// The checks run in a fixed order (mythic, then rare→epic, then common→rare),
/// so a common shard far past the epic threshold only reaches rare in one pass.
pub fn promote(rarity: Rarity, xp: i32) -> Rarity {
    let mut rarity = rarity;
    if xp >= MYTHIC_SHARD_XP && rarity != Rarity::Mythic {
        rarity = Rarity::Mythic;
    }
    if xp >= EPIC_SHARD_XP && rarity == Rarity::Rare {
        rarity = Rarity::Epic;
    }
    if xp >= RARE_SHARD_XP && rarity == Rarity::Common {
        rarity = Rarity::Rare;
    }
    rarity
}

/// Add `gain` to a shard and run promotion. Returns true if the rarity changed.
pub fn evolve_shard(shard: &mut MemoryShard, gain: i32) -> bool {
    shard.xp = shard.xp.saturating_add(gain.max(0));
    let before = shard.rarity;
    shard.rarity = promote(before, shard.xp);
    shard.rarity != before
}

/// Roll for a new common shard
pub fn maybe_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    twin_id: Uuid,
    probability: f64,
    context: &str,
) -> Option<MemoryShard> {
    // NaN or infinite probabilities never spawn
    let probability = if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if !rng.gen_bool(probability) {
        return None;
    }

    let shard_type = SPAWNED_SHARD_TYPES[rng.gen_range(0..SPAWNED_SHARD_TYPES.len())];
    let value = if context.trim().is_empty() {
        format!("A new {} shard crystallizes", shard_type)
    } else {
        format!("A new {} shard crystallizes from {}", shard_type, context.trim())
    };

    Some(MemoryShard::new(twin_id, shard_type, value, Rarity::Common, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn shard(rarity: Rarity, xp: i32) -> MemoryShard {
        MemoryShard::new(Uuid::new_v4(), "echo", "test", rarity, xp)
    }

    #[test]
    fn test_non_finite_probability_never_spawns() {
        let mut rng = StdRng::seed_from_u64(1);
        for p in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(maybe_spawn(&mut rng, Uuid::nil(), p, "post").is_none());
        }
    }

    #[test]
    fn test_base_gain() {
        assert_eq!(xp_gain_for_context("visited a profile"), 10);
    }

    #[test]
    fn test_bonuses_are_additive() {
        assert_eq!(xp_gain_for_context("new post"), 15);
        assert_eq!(xp_gain_for_context("post reaction"), 18);
        assert_eq!(xp_gain_for_context("post reaction training ritual"), 58);
    }

    #[test]
    fn test_bonuses_are_case_sensitive() {
        assert_eq!(xp_gain_for_context("New POST"), 10);
        assert_eq!(xp_gain_for_context("Ritual"), 10);
    }

    #[test]
    fn test_common_to_rare_at_threshold() {
        let mut s = shard(Rarity::Common, 95);
        assert!(evolve_shard(&mut s, xp_gain_for_context("")));
        assert_eq!(s.xp, 105);
        assert_eq!(s.rarity, Rarity::Rare);
    }

    #[test]
    fn test_check_order_promotes_one_tier_below_mythic() {
        assert_eq!(promote(Rarity::Common, 350), Rarity::Rare);
        assert_eq!(promote(Rarity::Rare, 350), Rarity::Epic);
        assert_eq!(promote(Rarity::Common, 1000), Rarity::Mythic);
        assert_eq!(promote(Rarity::Epic, 999), Rarity::Epic);
        assert_eq!(promote(Rarity::Epic, 1000), Rarity::Mythic);
    }

    #[test]
    fn test_spawn_certain_and_never() {
        let mut rng = StdRng::seed_from_u64(42);
        let twin_id = Uuid::new_v4();
        let spawned = maybe_spawn(&mut rng, twin_id, 1.0, "ritual").expect("spawn");
        assert_eq!(spawned.twin_id, twin_id);
        assert_eq!(spawned.rarity, Rarity::Common);
        assert_eq!(spawned.xp, 0);
        assert!(SPAWNED_SHARD_TYPES.contains(&spawned.shard_type.as_str()));
        assert!(maybe_spawn(&mut rng, twin_id, 0.0, "ritual").is_none());
    }

    fn arb_rarity() -> impl Strategy<Value = Rarity> {
        prop::sample::select(Rarity::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_rarity_never_demoted(rarity in arb_rarity(), xp in 0i32..2000, gain in 0i32..2000) {
            let mut s = shard(rarity, xp);
            evolve_shard(&mut s, gain);
            prop_assert!(s.rarity >= rarity);
            prop_assert_eq!(s.xp, xp + gain);
        }
    }
}
