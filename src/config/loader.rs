use super::ArenaConfig;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the configuration snapshot kept at the campaign root.
pub const SNAPSHOT_FILE: &str = "config.toml";

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write `config.toml` into `campaign_root` unless one is already there.
    ///
    /// Returns the snapshot path when this call wrote it.
    pub fn write_snapshot_if_missing(&self, campaign_root: &Path) -> Result<Option<PathBuf>> {
        let snapshot = campaign_root.join(SNAPSHOT_FILE);
        if snapshot.exists() {
            return Ok(None);
        }
        fs::create_dir_all(campaign_root)
            .with_context(|| format!("Failed to create {}", campaign_root.display()))?;
        fs::write(&snapshot, self.to_toml()?)
            .with_context(|| format!("Failed to write {}", snapshot.display()))?;
        Ok(Some(snapshot))
    }
}
