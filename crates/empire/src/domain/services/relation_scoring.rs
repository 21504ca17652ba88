//! Twin relation scoring
//!
//! Three independent sub-scores (alignment, tone, shared traits) summed into
//! a total that classifies the directed pair as ally, rival or neutral.

use serde::Serialize;

use crate::domain::entities::Twin;
use crate::domain::tables::{
    self, ALIGNMENT_GAP_DIVISOR, ALIGNMENT_MAX_SCORE, ALLY_ABOVE, RIVAL_BELOW,
    SHARED_TRAIT_SCORE, TONE_COMPATIBLE_SCORE, TONE_EXACT_SCORE, TONE_OTHER_SCORE,
};
use crate::domain::value_objects::{Alignment, RelationType};

/// Full breakdown of a relation computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationScore {
    pub alignment_score: f64,
    pub tone_score: f64,
    pub trait_score: f64,
    pub total: f64,
    pub relation_type: RelationType,
    /// Always within 0..=100
    pub strength: f64,
}

impl RelationScore {
    /// Strength as stored on the relation row
    pub fn strength_points(&self) -> i32 {
        self.strength.round() as i32
    }
}

pub fn alignment_score(a: &str, b: &str) -> f64 {
    let gap = (Alignment::score_of(a) - Alignment::score_of(b)).abs();
    ALIGNMENT_MAX_SCORE - gap / ALIGNMENT_GAP_DIVISOR
}

pub fn tone_score(a: &str, b: &str) -> f64 {
    if a == b {
        TONE_EXACT_SCORE
    } else if tables::tones_compatible(a, b) {
        TONE_COMPATIBLE_SCORE
    } else {
        TONE_OTHER_SCORE
    }
}

/// Ten points per shared trait, unbounded
pub fn trait_score(shared: usize) -> f64 {
    shared as f64 * SHARED_TRAIT_SCORE
}

/// Relation type and strength for a total score
pub fn classify(total: f64) -> (RelationType, f64) {
    let (relation_type, strength) = if total > ALLY_ABOVE {
        (RelationType::Ally, total.min(100.0))
    } else if total < RIVAL_BELOW {
        (RelationType::Rival, (100.0 - total).min(100.0))
    } else {
        (RelationType::Neutral, (50.0 - total).abs())
    };
    (relation_type, strength.clamp(0.0, 100.0))
}

/// Score the directed relation `twin -> target`
pub fn score(twin: &Twin, target: &Twin) -> RelationScore {
    let alignment_score = alignment_score(&twin.alignment, &target.alignment);
    let tone_score = tone_score(&twin.tone, &target.tone);
    let trait_score = trait_score(twin.shared_traits(target));
    let total = alignment_score + tone_score + trait_score;
    let (relation_type, strength) = classify(total);

    RelationScore {
        alignment_score,
        tone_score,
        trait_score,
        total,
        relation_type,
        strength,
    }
}
