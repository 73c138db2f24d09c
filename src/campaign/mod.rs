//! Sequential multi-game campaign for one worker rank.

mod outcome;

pub use outcome::{GameOutcome, META_FILE};

use crate::agents::Agent;
use crate::backends::{BackendRegistry, DescriptorCache};
use crate::config::{ArenaConfig, derive_for_rank};
use crate::error::Result;
use crate::game::{
    EnvironmentFactory, Replacement, RoleAssignment, apply_replacement, assign_backends,
    compute_roles,
};
use crate::session::{GameResult, run_game};
use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Directory name of game `game_id` (1-based).
pub fn game_dir_name(game_id: usize) -> String {
    format!("game_{game_id}")
}

/// Per-seat interaction log name (1-based seat).
pub fn seat_log_name(seat: usize) -> String {
    format!("Player_{seat}.jsonl")
}

/// Owns everything one worker needs to play its games: the registry, the
/// rank-shifted configuration, resolved descriptors and the role shuffle rng.
pub struct Campaign {
    registry: BackendRegistry,
    config: ArenaConfig,
    rank: u16,
    output_dir: PathBuf,
    cache: DescriptorCache,
    rng: StdRng,
}

impl Campaign {
    /// Validate and resolve every role group before the first game.
    ///
    /// Unregistered backend types and missing ports fail with
    /// [`ArenaError::Registry`](crate::error::ArenaError::Registry); invalid
    /// configuration and rank port overflow fail with
    /// [`ArenaError::Config`](crate::error::ArenaError::Config).
    pub fn prepare(
        registry: BackendRegistry,
        base: &ArenaConfig,
        rank: u16,
        output_dir: &Path,
    ) -> Result<Self> {
        let config = derive_for_rank(base, rank)?.into_owned();
        config.validate()?;

        let mut cache = DescriptorCache::new();
        for (name, group) in &config.agents {
            if let Err(e) = cache.resolve(&registry, &group.backend, &group.params) {
                tracing::error!(group = %name, error = %e, "failed to resolve role group");
                return Err(e.into());
            }
        }

        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        let campaign_root = match output_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        match base.write_snapshot_if_missing(campaign_root) {
            Ok(Some(path)) => tracing::info!(path = %path.display(), "config snapshot written"),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %format!("{e:#}"), "failed to write config snapshot"),
        }

        let rng = match config.game.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(rank))),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Ok(Self {
            registry,
            config,
            rank,
            output_dir: output_dir.to_path_buf(),
            cache,
            rng,
        })
    }

    /// Replace the role shuffle rng.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn rank(&self) -> u16 {
        self.rank
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of backend descriptors constructed so far.
    pub fn descriptor_builds(&self) -> usize {
        self.cache.builds()
    }

    /// Play `game_count` games in order.
    ///
    /// A game that fails at any point after its directory exists is recorded
    /// as [`GameResult::Error`] and the campaign moves on. Games whose
    /// directory already holds a [`META_FILE`] are skipped, so a restarted
    /// worker picks up after the last recorded game. Only a failure to create
    /// a game directory aborts the run.
    pub async fn run(
        &mut self,
        game_count: usize,
        environments: &dyn EnvironmentFactory,
    ) -> anyhow::Result<Vec<GameOutcome>> {
        let mut outcomes = Vec::with_capacity(game_count);

        for game_id in 1..=game_count {
            let game_dir = self.output_dir.join(game_dir_name(game_id));
            fs::create_dir_all(&game_dir)
                .with_context(|| format!("Failed to create {}", game_dir.display()))?;

            // Skipped games still consume their role draw.
            let roles = compute_roles(&self.config.game.roles, &mut self.rng);
            if game_dir.join(META_FILE).exists() {
                tracing::warn!(game_id, dir = %game_dir.display(), "game already recorded; skipping");
                continue;
            }

            let role_map = serde_json::to_string(&roles.role_map())?;
            tracing::info!(
                game_id,
                rank = self.rank,
                dir = %game_dir.display(),
                roles = %role_map,
                "game started"
            );

            let timestamp = unix_seconds();
            let started = Instant::now();
            let result = match self.play(&roles, &game_dir, environments).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(game_id, error = %format!("{e:#}"), "game failed");
                    GameResult::Error
                }
            };
            let duration = started.elapsed().as_secs_f64();

            let outcome = GameOutcome {
                game_id,
                roles,
                rank: self.rank,
                timestamp,
                result,
                duration,
            };
            if let Err(e) = outcome.persist(&game_dir) {
                tracing::error!(game_id, error = %format!("{e:#}"), "failed to record game outcome");
            }
            tracing::info!(game_id, %result, duration, "game finished");
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    async fn play(
        &mut self,
        roles: &RoleAssignment,
        game_dir: &Path,
        environments: &dyn EnvironmentFactory,
    ) -> anyhow::Result<GameResult> {
        let replacement = match &self.config.replace {
            Some(policy) => apply_replacement(roles, policy, &mut self.rng)?,
            None => Replacement::none(),
        };
        if !replacement.is_empty() {
            tracing::info!(seats = ?replacement.indices(), "seats replaced");
        }

        let group_keys = assign_backends(roles, &replacement, &self.config.agents);
        let mut agents: Vec<Box<dyn Agent>> = Vec::with_capacity(group_keys.len());
        for (idx, key) in group_keys.iter().enumerate() {
            let seat = idx + 1;
            let group = self
                .config
                .agents
                .get(key)
                .with_context(|| format!("no role group `{key}` for Player_{seat}"))?;
            let descriptor = self
                .cache
                .resolve(&self.registry, &group.backend, &group.params)?;
            let agent = self.registry.build_agent(
                &group.backend,
                seat,
                descriptor,
                &game_dir.join(seat_log_name(seat)),
            )?;
            agents.push(agent);
        }

        let mut env = environments.create(&self.config.game)?;
        run_game(env.as_mut(), &mut agents, roles).await
    }
}

#[allow(clippy::cast_precision_loss)]
fn unix_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
