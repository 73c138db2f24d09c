mod loader;
pub mod rank;
pub mod schema;

pub use loader::SNAPSHOT_FILE;
pub use rank::derive_for_rank;
pub use schema::{ArenaConfig, BackendGroup, BackendParams, EnvironmentConfig, GameConfig};
