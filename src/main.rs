#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use werewolf_arena::cli::Cli;
use werewolf_arena::game::SubprocessEnvironmentFactory;
use werewolf_arena::{ArenaConfig, BackendRegistry, Campaign, GameResult};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let mut config = ArenaConfig::load(&cli.config)?;
    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }

    let registry = BackendRegistry::with_builtin_backends()?;
    let environments = SubprocessEnvironmentFactory::new(&config.environment)?;
    let mut campaign = Campaign::prepare(registry, &config, cli.rank, &cli.output_dir)?;

    let outcomes = campaign.run(cli.num_games, &environments).await?;
    let errors = outcomes
        .iter()
        .filter(|outcome| outcome.result == GameResult::Error)
        .count();
    tracing::info!(
        games = outcomes.len(),
        errors,
        rank = cli.rank,
        output = %cli.output_dir.display(),
        "campaign finished"
    );
    Ok(())
}
