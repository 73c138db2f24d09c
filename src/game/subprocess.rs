//! Game engine running as a child process.
//!
//! The engine reads one JSON request per line on stdin and answers with one
//! JSON line on stdout:
//!
//! - `{"op":"reset","roles":[...],"game":{...}}` → `{"observation":{...}}`
//! - `{"op":"step","action":...}` → `{"observation":{...},"reward":0,"done":false,"info":{}}`
//!
//! Any reply carrying an `"error"` field fails the current game.

use super::env::{Action, EnvFuture, Environment, EnvironmentFactory, Observation, StepOutcome};
use super::roles::RoleAssignment;
use crate::config::{EnvironmentConfig, GameConfig};
use crate::error::EnvironmentError;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Value, json};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

pub struct SubprocessEnvironment {
    program: String,
    game: Value,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    // Held so the engine is killed with the environment.
    _child: Child,
}

#[derive(Debug, Deserialize)]
struct ResetReply {
    observation: Observation,
}

impl SubprocessEnvironment {
    pub fn spawn(command: &[String], game: &GameConfig) -> Result<Self> {
        let Some((program, args)) = command.split_first() else {
            bail!("environment command is empty");
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start environment `{program}`"))?;

        let stdin = child
            .stdin
            .take()
            .context("environment stdin was not captured")?;
        let stdout = child
            .stdout
            .take()
            .context("environment stdout was not captured")?;

        Ok(Self {
            program: program.clone(),
            game: serde_json::to_value(game).context("failed to encode game config")?,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            _child: child,
        })
    }

    async fn request(&mut self, message: &Value) -> Result<Value> {
        let mut line = serde_json::to_string(message)?;
        line.push('\n');
        self.stdin
            .write_all(line.as_bytes())
            .await
            .with_context(|| format!("failed to write to environment `{}`", self.program))?;
        self.stdin.flush().await?;

        let reply = self
            .stdout
            .next_line()
            .await
            .with_context(|| format!("failed to read from environment `{}`", self.program))?
            .ok_or(EnvironmentError::Closed)?;

        let value: Value = serde_json::from_str(&reply).map_err(|e| {
            EnvironmentError::Protocol(format!("reply is not JSON ({e}): {reply}"))
        })?;
        if let Some(error) = value.get("error") {
            bail!("environment `{}` reported an error: {error}", self.program);
        }
        tracing::trace!(program = %self.program, %reply, "environment reply");
        Ok(value)
    }
}

impl Environment for SubprocessEnvironment {
    fn reset<'a>(&'a mut self, roles: &'a RoleAssignment) -> EnvFuture<'a, Observation> {
        Box::pin(async move {
            let message = json!({
                "op": "reset",
                "roles": roles.roles(),
                "game": self.game,
            });
            let reply: ResetReply = serde_json::from_value(self.request(&message).await?)
                .map_err(|e| EnvironmentError::Protocol(format!("bad reset reply: {e}")))?;
            Ok(reply.observation)
        })
    }

    fn step(&mut self, action: Action) -> EnvFuture<'_, StepOutcome> {
        Box::pin(async move {
            let message = json!({"op": "step", "action": action});
            let outcome: StepOutcome = serde_json::from_value(self.request(&message).await?)
                .map_err(|e| EnvironmentError::Protocol(format!("bad step reply: {e}")))?;
            Ok(outcome)
        })
    }
}

/// Spawns a fresh engine process for every game.
#[derive(Debug, Clone)]
pub struct SubprocessEnvironmentFactory {
    command: Vec<String>,
}

impl SubprocessEnvironmentFactory {
    pub fn new(config: &EnvironmentConfig) -> Result<Self> {
        if config.command.is_empty() {
            bail!("[environment] command must name the game engine executable");
        }
        Ok(Self {
            command: config.command.clone(),
        })
    }
}

impl EnvironmentFactory for SubprocessEnvironmentFactory {
    fn create(&self, game: &GameConfig) -> Result<Box<dyn Environment>> {
        Ok(Box::new(SubprocessEnvironment::spawn(&self.command, game)?))
    }
}
