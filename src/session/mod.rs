//! Drives a single game from reset to a terminal step.

use crate::agents::Agent;
use crate::error::EnvironmentError;
use crate::game::{Environment, RoleAssignment, StepOutcome};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Final classification of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GameResult {
    #[serde(rename = "Werewolf win")]
    #[strum(serialize = "Werewolf win")]
    WerewolfWin,
    #[serde(rename = "Villager win")]
    #[strum(serialize = "Villager win")]
    VillagerWin,
    Draw,
    /// The game aborted; no winner can be attributed.
    Error,
}

impl GameResult {
    pub fn from_indicator(indicator: Option<i64>) -> Self {
        match indicator {
            Some(1) => GameResult::WerewolfWin,
            Some(-1) => GameResult::VillagerWin,
            _ => GameResult::Draw,
        }
    }

    pub fn from_outcome(outcome: &StepOutcome) -> Self {
        Self::from_indicator(outcome.win_indicator())
    }
}

/// Play one game to completion.
///
/// `agents[i]` plays seat `i + 1`. Every failure (environment, agent or an
/// out-of-range acting seat) propagates to the caller, which decides how the
/// game is recorded.
pub async fn run_game(
    env: &mut dyn Environment,
    agents: &mut [Box<dyn Agent>],
    roles: &RoleAssignment,
) -> anyhow::Result<GameResult> {
    for agent in agents.iter_mut() {
        agent.reset();
    }

    let mut observation = env.reset(roles).await?;
    let mut turns = 0_usize;

    loop {
        let seat = observation.acting_seat()?;
        let seats = agents.len();
        let agent = seat
            .checked_sub(1)
            .and_then(|idx| agents.get_mut(idx))
            .ok_or(EnvironmentError::SeatOutOfRange { seat, seats })?;

        let action = agent.act(&observation).await?;
        let outcome = env.step(action).await?;
        turns += 1;

        if outcome.done {
            let result = GameResult::from_outcome(&outcome);
            tracing::debug!(turns, %result, "game reached terminal step");
            return Ok(result);
        }
        observation = outcome.observation;
    }
}
