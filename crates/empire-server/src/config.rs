//! Server configuration read from Shuttle secrets.

use shuttle_runtime::SecretStore;

use crate::application::ShardEvolutionConfig;

/// Runtime settings for the server
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Bearer key for the chat completion API. Generation is disabled without it.
    pub ai_api_key: Option<String>,
    pub ai_api_url: Option<String>,
    pub ai_model: Option<String>,
    /// Seconds between automatic season rotations (None = scheduler off)
    pub season_rotation_interval_secs: Option<u64>,
    pub shard_evolution: ShardEvolutionConfig,
}

impl AppConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Self {
        Self::from_lookup(|key| secrets.get(key))
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let season_rotation_interval_secs = get("SEASON_ROTATION_INTERVAL_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0);

        let mut shard_evolution = ShardEvolutionConfig::default();
        if let Some(p) = get("SHARD_SPAWN_PROBABILITY")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite())
        {
            shard_evolution.spawn_probability = p.clamp(0.0, 1.0);
        }

        Self {
            ai_api_key: get("AI_API_KEY").or_else(|| get("OPENAI_API_KEY")),
            ai_api_url: get("AI_API_URL"),
            ai_model: get("AI_MODEL"),
            season_rotation_interval_secs,
            shard_evolution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_empty_secrets_use_defaults() {
        let config = config(&[]);
        assert!(config.ai_api_key.is_none());
        assert!(config.season_rotation_interval_secs.is_none());
        assert_eq!(config.shard_evolution.spawn_probability, 0.15);
    }

    #[test]
    fn test_openai_key_is_fallback() {
        let config = config(&[("OPENAI_API_KEY", "sk-fallback")]);
        assert_eq!(config.ai_api_key.as_deref(), Some("sk-fallback"));

        let config = self::config(&[("AI_API_KEY", "sk-main"), ("OPENAI_API_KEY", "sk-fallback")]);
        assert_eq!(config.ai_api_key.as_deref(), Some("sk-main"));
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = config(&[("AI_API_KEY", "  ")]);
        assert!(config.ai_api_key.is_none());
    }

    #[test]
    fn test_rotation_interval() {
        assert_eq!(
            config(&[("SEASON_ROTATION_INTERVAL_SECS", "86400")]).season_rotation_interval_secs,
            Some(86400)
        );
        assert!(config(&[("SEASON_ROTATION_INTERVAL_SECS", "0")])
            .season_rotation_interval_secs
            .is_none());
        assert!(config(&[("SEASON_ROTATION_INTERVAL_SECS", "daily")])
            .season_rotation_interval_secs
            .is_none());
    }

    #[test]
    fn test_spawn_probability_is_clamped() {
        let config = config(&[("SHARD_SPAWN_PROBABILITY", "1.7")]);
        assert_eq!(config.shard_evolution.spawn_probability, 1.0);
    }

    #[test]
    fn test_non_finite_spawn_probability_keeps_default() {
        for raw in ["NaN", "inf", "-inf"] {
            let config = config(&[("SHARD_SPAWN_PROBABILITY", raw)]);
            assert_eq!(config.shard_evolution.spawn_probability, 0.15);
        }
    }
}
