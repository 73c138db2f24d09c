use super::log::{InteractionLog, InteractionRecord};
use super::{Agent, AgentFuture, parse_action};
use crate::backends::{AgentFactory, BackendDescriptor, BackendKind};
use crate::game::Observation;
use anyhow::Context;
use console::style;
use dialoguer::Input;
use std::sync::Arc;

/// Seat played by a person at the terminal.
pub struct HumanAgent {
    seat: usize,
    log: InteractionLog,
    turn: usize,
}

impl HumanAgent {
    pub fn new(seat: usize, log: InteractionLog) -> Self {
        Self { seat, log, turn: 0 }
    }

    async fn prompt(&mut self, observation: &Observation) -> anyhow::Result<serde_json::Value> {
        let seat = self.seat;
        let rendered = serde_json::to_string_pretty(observation.as_value())?;

        let reply = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
            println!();
            println!("{}", style(format!("Player_{seat}, it is your turn")).cyan().bold());
            println!("{}", style(rendered).dim());
            let text: String = Input::new()
                .with_prompt(format!("Player_{seat} action"))
                .interact_text()?;
            Ok(text)
        })
        .await
        .context("console prompt task panicked")??;

        let action = parse_action(&reply);
        let mut record =
            InteractionRecord::new(self.seat, self.turn, observation.as_value(), &action);
        record.response = Some(&reply);
        self.log.append(&record)?;
        self.turn += 1;
        Ok(action)
    }
}

impl Agent for HumanAgent {
    fn seat(&self) -> usize {
        self.seat
    }

    fn reset(&mut self) {
        self.turn = 0;
    }

    fn act<'a>(&'a mut self, observation: &'a Observation) -> AgentFuture<'a> {
        Box::pin(self.prompt(observation))
    }
}

pub struct HumanAgentFactory;

impl AgentFactory for HumanAgentFactory {
    fn kind(&self) -> BackendKind {
        BackendKind::InteractiveHuman
    }

    fn create(
        &self,
        seat: usize,
        _descriptor: Arc<BackendDescriptor>,
        log: InteractionLog,
    ) -> anyhow::Result<Box<dyn Agent>> {
        Ok(Box::new(HumanAgent::new(seat, log)))
    }
}
