pub mod assign;
pub mod env;
pub mod replace;
pub mod roles;
pub mod subprocess;

pub use assign::{VILLAGER_GROUP, WEREWOLF_GROUP, assign_backends};
pub use env::{
    ACTING_SEAT_FIELD, Action, EnvFuture, Environment, EnvironmentFactory, Observation,
    StepOutcome, WIN_INDICATOR_FIELD,
};
pub use replace::{
    Eligibility, ReplaceTarget, Replacement, ReplacementPolicy, SelectionStrategy,
    apply_replacement,
};
pub use roles::{Role, RoleAssignment, RoleCounts, RoleMap, compute_roles};
pub use subprocess::{SubprocessEnvironment, SubprocessEnvironmentFactory};
