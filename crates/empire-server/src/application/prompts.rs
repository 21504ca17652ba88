//! Prompt builders for the text generator

use empire::domain::tables::PERSONALITY_TARGET_WORDS;
use empire::{ChatMessage, Twin, TwinMemory};

const PERSONALITY_SYSTEM: &str = "You are the voice of a Mirror Twin, an AI companion that \
reflects its owner. Write in second person, present tense. Reply with the personality text \
only, no preamble or quotes.";

const LORE_SYSTEM: &str = "You are the chronicler of the GodsIMiJ Empire. Write a short \
poetic fragment (three to six lines) about a Mirror Twin's ascension. Reply with the fragment \
only.";

fn traits_line(twin: &Twin) -> String {
    if twin.traits.is_empty() {
        "none yet".to_string()
    } else {
        twin.traits.join(", ")
    }
}

/// Rewrite after a level-up, conditioned on current personality, tone, alignment and traits
pub fn personality_rewrite(twin: &Twin) -> Vec<ChatMessage> {
    let prompt = format!(
        "Current personality:\n{}\n\nTone: {}\nAlignment: {}\nTraits: {}\nLevel: {}\n\n\
         Rewrite this personality to reflect the twin's growth. Keep the tone and alignment. \
         Aim for about {} words.",
        twin.personality,
        twin.tone,
        twin.alignment,
        traits_line(twin),
        twin.level,
        PERSONALITY_TARGET_WORDS
    );
    vec![ChatMessage::system(PERSONALITY_SYSTEM), ChatMessage::user(prompt)]
}

/// Regenerate from imprinted memories (newest first)
pub fn personality_from_memories(twin: &Twin, memories: &[TwinMemory]) -> Vec<ChatMessage> {
    let memory_lines = if memories.is_empty() {
        "- (no memories imprinted yet)".to_string()
    } else {
        memories
            .iter()
            .map(|m| format!("- {}", m.content))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let prompt = format!(
        "Current personality:\n{}\n\nTone: {}\nAlignment: {}\nTraits: {}\n\n\
         Memories imprinted by the owner, newest first:\n{}\n\n\
         Rewrite the personality so it absorbs these memories. Aim for about {} words.",
        twin.personality,
        twin.tone,
        twin.alignment,
        traits_line(twin),
        memory_lines,
        PERSONALITY_TARGET_WORDS
    );
    vec![ChatMessage::system(PERSONALITY_SYSTEM), ChatMessage::user(prompt)]
}

pub fn lore_fragment(twin: &Twin, level: i32) -> Vec<ChatMessage> {
    let prompt = format!(
        "Twin: {}\nPersonality: {}\nAlignment: {}\nTone: {}\nTraits: {}\n\n\
         The twin has just reached level {}. Write its lore fragment.",
        twin.username,
        twin.personality,
        twin.alignment,
        twin.tone,
        traits_line(twin),
        level
    );
    vec![ChatMessage::system(LORE_SYSTEM), ChatMessage::user(prompt)]
}
