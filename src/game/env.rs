//! Boundary contract with the game engine.
//!
//! The engine owns all turn and rule semantics. The runner only needs to know
//! which seat acts next and, once the game is over, who won.

use super::roles::RoleAssignment;
use crate::config::GameConfig;
use crate::error::EnvironmentError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Field of an observation naming the 1-based seat to act next.
pub const ACTING_SEAT_FIELD: &str = "current_act_idx";
/// Field of the terminal `info` mapping carrying the win indicator.
pub const WIN_INDICATOR_FIELD: &str = "Werewolf";

/// Actions are opaque to the runner; the engine interprets them.
pub type Action = Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation(Value);

impl Observation {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// 1-based seat the engine expects an action from.
    pub fn acting_seat(&self) -> Result<usize, EnvironmentError> {
        self.0
            .get(ACTING_SEAT_FIELD)
            .and_then(integral)
            .and_then(|seat| usize::try_from(seat).ok())
            .filter(|seat| *seat >= 1)
            .ok_or(EnvironmentError::MissingActingSeat)
    }
}

/// Integer value of a JSON number, accepting floats with no fractional part.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then(|| f as i64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Observation,
    #[serde(default)]
    pub reward: f64,
    pub done: bool,
    #[serde(default)]
    pub info: Map<String, Value>,
}

impl StepOutcome {
    /// `1` werewolves won, `-1` villagers won; anything else is a draw.
    pub fn win_indicator(&self) -> Option<i64> {
        self.info.get(WIN_INDICATOR_FIELD).and_then(integral)
    }
}

pub type EnvFuture<'a, T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send + 'a>>;

pub trait Environment: Send {
    /// Start a game with a fixed seat → role assignment.
    fn reset<'a>(&'a mut self, roles: &'a RoleAssignment) -> EnvFuture<'a, Observation>;

    /// Apply the acting seat's action.
    fn step(&mut self, action: Action) -> EnvFuture<'_, StepOutcome>;
}

/// Creates one fresh environment per game.
pub trait EnvironmentFactory {
    fn create(&self, game: &GameConfig) -> anyhow::Result<Box<dyn Environment>>;
}
