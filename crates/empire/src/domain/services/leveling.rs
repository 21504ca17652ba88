//! Leveling rules shared by both leveling policies
//!
//! Thresholds are cumulative: `table[i]` is the XP needed to stand at level
//! `i + 1`. A single grant may cross several thresholds.

use rand::Rng;
use serde::Serialize;

use crate::domain::tables::{self, RARE_LEVEL_UP_SHARD_LEVEL};
use crate::domain::value_objects::{Rarity, StatAttribute};

/// Result of applying an XP gain to a (level, xp) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub previous_level: i32,
    pub level: i32,
    pub xp: i32,
    /// Every level reached by this grant, ascending
    pub levels_gained: Vec<i32>,
}

impl LevelProgress {
    pub fn leveled_up(&self) -> bool {
        !self.levels_gained.is_empty()
    }
}

/// XP needed to stand at `level`, or `None` past the end of the table
pub fn threshold_for(thresholds: &[i32], level: i32) -> Option<i32> {
    if level < 1 {
        return Some(0);
    }
    thresholds.get((level - 1) as usize).copied()
}

/// Add `gain` to `xp` and advance `level` while the next threshold is met.
///
/// Negative gains are treated as zero; xp and level never decrease.
pub fn apply_xp(thresholds: &[i32], level: i32, xp: i32, gain: i32) -> LevelProgress {
    let xp = xp.saturating_add(gain.max(0));
    let mut current = level;
    let mut levels_gained = Vec::new();

    while let Some(candidate) = current.checked_add(1) {
        let Some(next) = threshold_for(thresholds, candidate) else {
            break;
        };
        if xp < next {
            break;
        }
        current = candidate;
        levels_gained.push(current);
    }

    LevelProgress {
        previous_level: level,
        level: current,
        xp,
        levels_gained,
    }
}

/// Append the trait unlocked at each gained level. Returns the newly added traits.
pub fn unlock_traits(traits: &mut Vec<String>, levels_gained: &[i32]) -> Vec<String> {
    let mut added = Vec::new();
    for level in levels_gained {
        if let Some(name) = tables::trait_for_level(*level) {
            if !traits.iter().any(|t| t == name) {
                traits.push(name.to_string());
                added.push(name.to_string());
            }
        }
    }
    added
}

/// Attribute bumped for one gained level on the stats record
pub fn pick_attribute<R: Rng + ?Sized>(rng: &mut R) -> StatAttribute {
    StatAttribute::ALL[rng.gen_range(0..StatAttribute::ALL.len())]
}

/// Rarity of the shard granted by the stats policy after a level-up
pub fn level_up_shard_rarity(new_level: i32) -> Rarity {
    if new_level >= RARE_LEVEL_UP_SHARD_LEVEL {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tables::{DIRECT_LEVEL_THRESHOLDS, STATS_LEVEL_THRESHOLDS};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_no_level_up_below_threshold() {
        let progress = apply_xp(&DIRECT_LEVEL_THRESHOLDS, 1, 0, 99);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.xp, 99);
        assert!(!progress.leveled_up());
    }

    #[test]
    fn test_exact_threshold_levels_up() {
        let progress = apply_xp(&DIRECT_LEVEL_THRESHOLDS, 1, 0, 100);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.levels_gained, vec![2]);
    }

    #[test]
    fn test_multi_level_jump() {
        let progress = apply_xp(&DIRECT_LEVEL_THRESHOLDS, 1, 0, 850);
        assert_eq!(progress.previous_level, 1);
        assert_eq!(progress.level, 5);
        assert_eq!(progress.levels_gained, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_caps_at_table_end() {
        let progress = apply_xp(&STATS_LEVEL_THRESHOLDS, 1, 0, 1_000_000);
        assert_eq!(progress.level, 10);
        let again = apply_xp(&STATS_LEVEL_THRESHOLDS, 10, progress.xp, 1_000);
        assert_eq!(again.level, 10);
        assert!(!again.leveled_up());
    }

    #[test]
    fn test_max_stored_level_does_not_overflow() {
        let progress = apply_xp(&DIRECT_LEVEL_THRESHOLDS, i32::MAX, 0, 500);
        assert_eq!(progress.level, i32::MAX);
        assert!(!progress.leveled_up());
    }

    #[test]
    fn test_tables_differ_for_same_grant() {
        let direct = apply_xp(&DIRECT_LEVEL_THRESHOLDS, 1, 0, 300);
        let stats = apply_xp(&STATS_LEVEL_THRESHOLDS, 1, 0, 300);
        assert_eq!(direct.level, 3);
        assert_eq!(stats.level, 4);
    }

    #[test]
    fn test_negative_gain_is_ignored() {
        let progress = apply_xp(&DIRECT_LEVEL_THRESHOLDS, 2, 150, -100);
        assert_eq!(progress.xp, 150);
        assert_eq!(progress.level, 2);
    }

    #[test]
    fn test_unlock_traits_skips_duplicates() {
        let mut traits = vec!["Curious".to_string()];
        let added = unlock_traits(&mut traits, &[2, 3, 4]);
        assert_eq!(added, vec!["Empathic".to_string(), "Insightful".to_string()]);
        assert_eq!(traits.len(), 3);
    }

    #[test]
    fn test_level_up_shard_rarity() {
        assert_eq!(level_up_shard_rarity(4), Rarity::Common);
        assert_eq!(level_up_shard_rarity(5), Rarity::Rare);
        assert_eq!(level_up_shard_rarity(9), Rarity::Rare);
    }

    #[test]
    fn test_pick_attribute_covers_all() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_attribute(&mut rng));
        }
        assert_eq!(seen.len(), StatAttribute::ALL.len());
    }

    /// Largest level whose own threshold and every threshold below it is met
    fn expected_level(table: &[i32], start: i32, xp: i32) -> i32 {
        let mut level = start;
        while (level as usize) < table.len() && table[level as usize] <= xp {
            level += 1;
        }
        level
    }

    proptest! {
        #[test]
        fn prop_level_is_largest_reachable(
            start in 1i32..=10,
            xp in 0i32..5000,
            gain in 0i32..5000,
            use_direct in any::<bool>(),
        ) {
            let table: &[i32] = if use_direct { &DIRECT_LEVEL_THRESHOLDS } else { &STATS_LEVEL_THRESHOLDS };
            let progress = apply_xp(table, start, xp, gain);
            prop_assert_eq!(progress.level, expected_level(table, start, xp + gain));
            prop_assert!(progress.level >= start);
            prop_assert!(progress.xp >= xp);
            prop_assert_eq!(progress.levels_gained.len() as i32, progress.level - start);
        }
    }
}
