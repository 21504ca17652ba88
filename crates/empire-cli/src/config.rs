//! Configuration management for Empire CLI
//!
//! Stores the API base URL and twin profiles in ~/.config/empire/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "empire";
const CONFIG_FILE: &str = "config.toml";

/// Environment override for the base URL (also read from `.env`)
pub const BASE_URL_ENV: &str = "EMPIRE_BASE_URL";

/// Profile for a twin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub twin_id: String,
    /// Owner; portal unlocks are keyed by user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_profile: None,
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default. `EMPIRE_BASE_URL` wins over the file.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Add a profile
    pub fn add_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> bool {
        let removed = self.profiles.remove(name).is_some();
        if removed && self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        removed
    }

    /// Set default profile
    pub fn set_default_profile(&mut self, name: String) -> bool {
        if self.profiles.contains_key(&name) {
            self.default_profile = Some(name);
            true
        } else {
            false
        }
    }

    /// Get the active profile (specified or default)
    pub fn get_profile(&self, name: Option<&str>) -> Option<&Profile> {
        let profile_name = name
            .map(|s| s.to_string())
            .or_else(|| self.default_profile.clone())?;

        self.profiles.get(&profile_name)
    }

    /// Twin ID: explicit flag first, then profile
    pub fn resolve_twin_id(&self, explicit: Option<&str>, profile: Option<&str>) -> Result<String> {
        if let Some(id) = explicit {
            return Ok(id.to_string());
        }
        self.get_profile(profile)
            .map(|p| p.twin_id.clone())
            .context("No twin given and no default profile set. Use --twin <ID> or -p <profile>.")
    }

    /// User ID: explicit flag first, then profile
    pub fn resolve_user_id(&self, explicit: Option<&str>, profile: Option<&str>) -> Result<String> {
        if let Some(id) = explicit {
            return Ok(id.to_string());
        }
        self.get_profile(profile)
            .and_then(|p| p.user_id.clone())
            .context("No user given and the profile has no user ID. Use --user <ID>.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_profile() -> Config {
        let mut config = Config::default();
        config.add_profile(
            "nova".to_string(),
            Profile {
                twin_id: "twin-1".to_string(),
                user_id: Some("user-1".to_string()),
                name: Some("Nova".to_string()),
            },
        );
        config
    }

    #[test]
    fn test_parse_minimal_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = with_profile();
        config.set_default_profile("nova".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();

        assert_eq!(parsed.default_profile.as_deref(), Some("nova"));
        assert_eq!(parsed.profiles["nova"], config.profiles["nova"]);
    }

    #[test]
    fn test_set_default_requires_existing_profile() {
        let mut config = with_profile();
        assert!(!config.set_default_profile("ghost".to_string()));
        assert!(config.set_default_profile("nova".to_string()));
    }

    #[test]
    fn test_remove_clears_default() {
        let mut config = with_profile();
        config.set_default_profile("nova".to_string());

        assert!(config.remove_profile("nova"));
        assert!(config.default_profile.is_none());
        assert!(!config.remove_profile("nova"));
    }

    #[test]
    fn test_resolution_order() {
        let mut config = with_profile();
        assert!(config.resolve_twin_id(None, None).is_err());

        config.set_default_profile("nova".to_string());
        assert_eq!(config.resolve_twin_id(None, None).unwrap(), "twin-1");
        assert_eq!(config.resolve_twin_id(Some("twin-9"), None).unwrap(), "twin-9");
        assert_eq!(config.resolve_user_id(None, Some("nova")).unwrap(), "user-1");
    }
}
