use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::client::ClientSettings;
use crate::api::transport::LEETCODE_GRAPHQL;
use crate::options::LoadOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
    pub username: Option<String>,
    pub load: LoadOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: LEETCODE_GRAPHQL.to_string(),
            timeout_secs: None,
            username: None,
            load: LoadOptions::default(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".peekaleet"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Option<Config>> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config dir {}", dir.display()))?;
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
username = "alice"
timeout_secs = 10

[load]
streak = true
recent_limit = 5
"#,
        )
        .unwrap();
        assert_eq!(config.endpoint, LEETCODE_GRAPHQL);
        assert_eq!(config.username.as_deref(), Some("alice"));
        assert!(config.load.streak);
        assert!(!config.load.contest);
        assert_eq!(config.load.recent_limit, 5);

        let settings = config.client_settings();
        assert_eq!(settings.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("peekaleet-{}.toml", std::process::id()));
        let config = Config {
            username: Some("bob".into()),
            load: LoadOptions::all(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);

        assert!(Config::load_from(&path).unwrap().is_none());
    }
}
