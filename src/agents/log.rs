use crate::llm::ChatMessage;
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only JSON Lines log of one seat's turns in one game.
#[derive(Debug, Clone)]
pub struct InteractionLog {
    path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct InteractionRecord<'a> {
    pub seat: usize,
    pub turn: usize,
    pub timestamp: String,
    pub observation: &'a Value,
    pub action: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'a [ChatMessage]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<&'a str>,
}

impl<'a> InteractionRecord<'a> {
    pub fn new(seat: usize, turn: usize, observation: &'a Value, action: &'a Value) -> Self {
        Self {
            seat,
            turn,
            timestamp: chrono::Utc::now().to_rfc3339(),
            observation,
            action,
            prompt: None,
            response: None,
        }
    }
}

impl InteractionLog {
    /// Create (or truncate) the log file.
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        File::create(path)
            .with_context(|| format!("failed to create interaction log {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &InteractionRecord<'_>) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
