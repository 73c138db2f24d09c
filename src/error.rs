use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the arena.
///
/// Setup-time defects (registry, config, assignment) have their own variants
/// so callers can tell a broken configuration apart from a game that failed
/// mid-session. `Campaign::prepare` reports setup defects through this type;
/// per-game orchestration keeps using `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum ArenaError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Backend registry ────────────────────────────────────────────────
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    // ── Role assignment ─────────────────────────────────────────────────
    #[error("assignment: {0}")]
    Assign(#[from] AssignError),

    // ── Environment ─────────────────────────────────────────────────────
    #[error("environment: {0}")]
    Environment(#[from] EnvironmentError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("port {port} of role group {group} overflows when shifted by rank {rank}")]
    PortOverflow { group: String, port: u16, rank: u16 },
}

// ─── Backend registry errors ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("backend key {0} is already registered")]
    DuplicateKey(String),

    #[error("backend type {0} is not registered")]
    UnregisteredType(String),

    #[error("backend type {backend} requires an explicit port")]
    MissingPort { backend: String },
}

// ─── Role assignment errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AssignError {
    #[error("no {role} seat available for replacement")]
    NoMatch { role: String },

    #[error("replacement needs {requested} seats but only {available} are eligible")]
    InsufficientCandidates { requested: usize, available: usize },

    #[error("villager-side replacement needs an explicit eligibility rule")]
    EligibilityUnset,
}

// ─── Environment errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("observation does not name an acting seat")]
    MissingActingSeat,

    #[error("acting seat {seat} is outside 1..={seats}")]
    SeatOutOfRange { seat: usize, seats: usize },

    #[error("environment process closed its output")]
    Closed,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ArenaError>;
