//! Seat actors: anything that turns an observation into an action.

pub mod chat;
pub mod human;
pub mod log;

pub use chat::{ChatAgent, ChatAgentFactory};
pub use human::{HumanAgent, HumanAgentFactory};
pub use log::{InteractionLog, InteractionRecord};

use crate::game::{Action, Observation};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub type AgentFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<Action>> + Send + 'a>>;

pub trait Agent: Send {
    /// 1-based seat this agent plays.
    fn seat(&self) -> usize;

    /// Drop per-game state before a new game starts.
    fn reset(&mut self);

    fn act<'a>(&'a mut self, observation: &'a Observation) -> AgentFuture<'a>;
}

/// Interpret free text as an action.
///
/// JSON replies (optionally inside a fenced code block) pass through as
/// structured values; anything else is sent to the engine as a string.
pub fn parse_action(text: &str) -> Action {
    let trimmed = text.trim();
    let body = strip_code_fence(trimmed).unwrap_or(trimmed);
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?.strip_suffix("```")?;
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    Some(rest.trim())
}
