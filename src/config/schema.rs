use crate::error::ConfigError;
use crate::game::{ReplaceTarget, ReplacementPolicy, RoleCounts, VILLAGER_GROUP, WEREWOLF_GROUP};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Full campaign configuration, one TOML file shared by every worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Path the config was loaded from - not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    pub game: GameConfig,

    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Role groups keyed by name (`werewolf`, `villager`, `seer`, ...).
    pub agents: BTreeMap<String, BackendGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<ReplacementPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Declared seat count; must match the role counts when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_player: Option<usize>,

    /// Seed for role shuffles and replacement sampling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default)]
    pub roles: RoleCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Engine executable and its arguments.
    #[serde(default)]
    pub command: Vec<String>,
}

/// One role group: which backend type serves it and how to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendGroup {
    pub backend: String,
    #[serde(default)]
    pub params: BackendParams,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let seats = self.game.roles.total();
        if seats == 0 {
            return Err(ConfigError::Validation(
                "game.roles must assign at least one seat".into(),
            ));
        }
        if let Some(n_player) = self.game.n_player
            && n_player != seats
        {
            return Err(ConfigError::Validation(format!(
                "game.n_player is {n_player} but role counts sum to {seats}"
            )));
        }

        for required in [WEREWOLF_GROUP, VILLAGER_GROUP] {
            if !self.agents.contains_key(required) {
                return Err(ConfigError::Validation(format!(
                    "agents.{required} must be configured"
                )));
            }
        }

        for (name, group) in &self.agents {
            if group.backend.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "agents.{name}.backend must not be empty"
                )));
            }
            if let Some(temp) = group.params.temperature
                && !(0.0..=2.0).contains(&temp)
            {
                return Err(ConfigError::Validation(format!(
                    "agents.{name}.params.temperature must be within 0.0..=2.0 (got {temp})"
                )));
            }
        }

        if let Some(policy) = &self.replace {
            validate_replacement(policy, &self.agents)?;
        }

        Ok(())
    }
}

fn validate_replacement(
    policy: &ReplacementPolicy,
    agents: &BTreeMap<String, BackendGroup>,
) -> Result<(), ConfigError> {
    if !agents.contains_key(&policy.substitute) {
        return Err(ConfigError::Validation(format!(
            "replace.substitute names missing role group `{}`",
            policy.substitute
        )));
    }

    if policy.target_kind() == Some(ReplaceTarget::Villager) {
        if policy.eligibility.is_none() {
            return Err(ConfigError::Validation(
                "replace.eligibility must be `non-werewolf` or `plain-villager` for villager targets"
                    .into(),
            ));
        }
        if policy.count == 0 {
            return Err(ConfigError::Validation(
                "replace.count must be at least 1".into(),
            ));
        }
    }

    Ok(())
}
