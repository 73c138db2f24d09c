use clap::Parser;
use std::path::PathBuf;

/// `werewolf-arena` - run werewolf game campaigns against model backends.
#[derive(Parser, Debug)]
#[command(name = "werewolf-arena")]
#[command(version)]
#[command(about = "Play batches of werewolf games between configured agent backends.", long_about = None)]
pub struct Cli {
    /// Campaign configuration file (TOML)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Directory receiving this worker's game records
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Worker rank; every configured backend port is shifted by it
    #[arg(short, long, default_value_t = 0)]
    pub rank: u16,

    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    pub num_games: usize,

    /// Seed for role shuffles (overrides `[game] seed`)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
