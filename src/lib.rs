#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod agents;
pub mod backends;
pub mod campaign;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod llm;
pub mod session;

pub use backends::{BackendDescriptor, BackendKind, BackendRegistry, DescriptorCache};
pub use campaign::{Campaign, GameOutcome};
pub use config::ArenaConfig;
pub use error::{ArenaError, AssignError, ConfigError, EnvironmentError, RegistryError};
pub use game::{Role, RoleAssignment};
pub use session::{GameResult, run_game};
