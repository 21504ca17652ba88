//! Fixed progression tables
//!
//! Immutable configuration data shared by the progression rules. Keeping the
//! numbers here lets the rules in `domain::services` be tested without a store.

use serde_json::json;

use crate::domain::value_objects::{PortalName, SeasonName};

// ============================================
// Leveling
// ============================================

/// Cumulative XP to reach level `i + 1`, used by the direct twin policy ("evolve-twin")
pub const DIRECT_LEVEL_THRESHOLDS: [i32; 10] = [0, 100, 250, 500, 800, 1200, 1700, 2300, 3000, 4000];

/// Cumulative XP to reach level `i + 1`, used by the stats policy ("twin-level-up")
pub const STATS_LEVEL_THRESHOLDS: [i32; 10] = [0, 50, 150, 300, 500, 750, 1050, 1400, 1800, 2250];

/// Trait unlocked on reaching each level
pub const TRAIT_UNLOCKS: [(i32, &str); 9] = [
    (2, "Curious"),
    (3, "Empathic"),
    (4, "Insightful"),
    (5, "Resilient"),
    (6, "Mystic"),
    (7, "Visionary"),
    (8, "Sage"),
    (9, "Transcendent"),
    (10, "Eternal"),
];

/// Target length of a regenerated personality, in words
pub const PERSONALITY_TARGET_WORDS: usize = 120;

/// Level at and above which the stats policy grants a rare level-up shard
pub const RARE_LEVEL_UP_SHARD_LEVEL: i32 = 5;

pub fn trait_for_level(level: i32) -> Option<&'static str> {
    TRAIT_UNLOCKS
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, name)| *name)
}

// ============================================
// Memory shards
// ============================================

pub const BASE_SHARD_XP: i32 = 10;

/// Case-sensitive substring bonuses; every match adds its bonus
pub const CONTEXT_XP_BONUSES: [(&str, i32); 4] = [
    ("post", 5),
    ("reaction", 3),
    ("training", 15),
    ("ritual", 25),
];

pub const RARE_SHARD_XP: i32 = 100;
pub const EPIC_SHARD_XP: i32 = 300;
pub const MYTHIC_SHARD_XP: i32 = 1000;

pub const SHARD_SPAWN_PROBABILITY: f64 = 0.15;

pub const SPAWNED_SHARD_TYPES: [&str; 5] = ["emotion", "insight", "echo", "dream", "fragment"];

// ============================================
// Quests
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestTemplate {
    pub text: &'static str,
    pub xp_reward: i32,
}

pub const QUEST_POOL: [QuestTemplate; 10] = [
    QuestTemplate { text: "Share a reflection in a new post", xp_reward: 20 },
    QuestTemplate { text: "React to three posts from other creators", xp_reward: 15 },
    QuestTemplate { text: "Leave a thoughtful comment on a friend's post", xp_reward: 15 },
    QuestTemplate { text: "Imprint a memory onto your Mirror Twin", xp_reward: 25 },
    QuestTemplate { text: "Complete a training session with your twin", xp_reward: 30 },
    QuestTemplate { text: "Visit the profile of a twin you have never met", xp_reward: 10 },
    QuestTemplate { text: "Perform a ritual at the altar", xp_reward: 40 },
    QuestTemplate { text: "Follow a new member of the Empire", xp_reward: 10 },
    QuestTemplate { text: "Read your twin's latest lore entry", xp_reward: 10 },
    QuestTemplate { text: "Post an image that captures your current mood", xp_reward: 20 },
];

pub const MIN_DAILY_QUESTS: usize = 2;
pub const MAX_DAILY_QUESTS: usize = 3;
pub const QUEST_TTL_HOURS: i64 = 24;

// ============================================
// Relations
// ============================================

pub const TONES: [&str; 8] = [
    "wise",
    "calm",
    "playful",
    "mysterious",
    "fierce",
    "poetic",
    "sarcastic",
    "gentle",
];

/// Unordered compatible tone pairs
pub const TONE_COMPATIBILITY: [(&str, &str); 8] = [
    ("wise", "calm"),
    ("wise", "poetic"),
    ("calm", "gentle"),
    ("playful", "sarcastic"),
    ("playful", "gentle"),
    ("mysterious", "poetic"),
    ("mysterious", "fierce"),
    ("fierce", "sarcastic"),
];

pub fn tones_compatible(a: &str, b: &str) -> bool {
    TONE_COMPATIBILITY
        .iter()
        .any(|(x, y)| (*x == a && *y == b) || (*x == b && *y == a))
}

/// Divisor mapping the 0..=100 alignment gap onto the 30-point sub-score
pub const ALIGNMENT_GAP_DIVISOR: f64 = 3.33;
pub const ALIGNMENT_MAX_SCORE: f64 = 30.0;
pub const TONE_EXACT_SCORE: f64 = 30.0;
pub const TONE_COMPATIBLE_SCORE: f64 = 20.0;
pub const TONE_OTHER_SCORE: f64 = 10.0;
pub const SHARED_TRAIT_SCORE: f64 = 10.0;
pub const ALLY_ABOVE: f64 = 60.0;
pub const RIVAL_BELOW: f64 = 30.0;

// ============================================
// Seasons
// ============================================

pub const SEASON_DURATION_DAYS: i64 = 90;
pub const SEASONAL_SHARD_XP: i32 = 50;

/// Effects payload stored on a newly created event
pub fn season_effects(season: SeasonName) -> serde_json::Value {
    match season {
        SeasonName::Awakening => json!({
            "xp_multiplier": 1.25,
            "favored_shard": "insight",
            "description": "Twins stir and remember who they were."
        }),
        SeasonName::RadiantBloom => json!({
            "xp_multiplier": 1.5,
            "favored_alignment": "radiant",
            "description": "Light spreads through every shard."
        }),
        SeasonName::EclipseConvergence => json!({
            "xp_multiplier": 2.0,
            "favored_alignment": "neutral",
            "description": "Light and shadow meet; the Starforge opens."
        }),
        SeasonName::ShadowHarvest => json!({
            "xp_multiplier": 1.5,
            "favored_alignment": "shadow",
            "description": "What was hidden is gathered in."
        }),
    }
}

// ============================================
// Portals
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalRequirements {
    pub min_level: i32,
    pub requires_ritual: bool,
    pub required_season: Option<SeasonName>,
}

pub fn portal_requirements(portal: PortalName) -> PortalRequirements {
    match portal {
        PortalName::Moonwell => PortalRequirements {
            min_level: 3,
            requires_ritual: false,
            required_season: None,
        },
        PortalName::Shadowgate => PortalRequirements {
            min_level: 5,
            requires_ritual: true,
            required_season: None,
        },
        PortalName::Dreamspire => PortalRequirements {
            min_level: 7,
            requires_ritual: true,
            required_season: Some(SeasonName::RadiantBloom),
        },
        PortalName::Starforge => PortalRequirements {
            min_level: 9,
            requires_ritual: false,
            required_season: Some(SeasonName::EclipseConvergence),
        },
    }
}

// ============================================
// Side-effect XP grants
// ============================================

pub const IMPRINT_XP: i32 = 20;
pub const TRAINING_XP: i32 = 50;
