use crate::game::{Role, RoleAssignment};
use crate::session::GameResult;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-game record file inside `game_<n>/`.
pub const META_FILE: &str = "meta_info.json";

/// Immutable summary of one finished (or aborted) game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    pub game_id: usize,
    pub roles: RoleAssignment,
    pub rank: u16,
    /// Seconds since the Unix epoch at game start.
    pub timestamp: f64,
    pub result: GameResult,
    /// Wall-clock seconds.
    pub duration: f64,
}

#[derive(Serialize)]
struct MetaInfo<'a> {
    game_id: usize,
    roles: &'a [Role],
    role_map: crate::game::RoleMap<'a>,
    rank: u16,
    timestamp: f64,
    result: GameResult,
    duration: f64,
}

impl GameOutcome {
    fn meta_info(&self) -> MetaInfo<'_> {
        MetaInfo {
            game_id: self.game_id,
            roles: self.roles.roles(),
            role_map: self.roles.role_map(),
            rank: self.rank,
            timestamp: self.timestamp,
            result: self.result,
            duration: self.duration,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&self.meta_info()).context("Failed to serialize game outcome")
    }

    /// Write `meta_info.json` into `game_dir`. Never overwrites.
    pub fn persist(&self, game_dir: &Path) -> anyhow::Result<PathBuf> {
        let path = game_dir.join(META_FILE);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        std::io::Write::write_all(&mut file, self.to_json()?.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
