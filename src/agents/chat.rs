use super::log::{InteractionLog, InteractionRecord};
use super::{Agent, AgentFuture, parse_action};
use crate::backends::descriptor::DEFAULT_MODEL;
use crate::backends::{AgentFactory, BackendDescriptor, BackendKind, ServedModel};
use crate::game::Observation;
use crate::llm::ChatMessage;
use anyhow::Context;
use std::sync::Arc;

fn system_prompt(seat: usize) -> String {
    format!(
        "You are Player_{seat} in a game of Werewolf. Each user message is the current \
         game observation as JSON. Reply with your action only."
    )
}

/// Seat played by a model behind an OpenAI-compatible endpoint.
pub struct ChatAgent {
    seat: usize,
    descriptor: Arc<BackendDescriptor>,
    log: InteractionLog,
    history: Vec<ChatMessage>,
    turn: usize,
}

impl ChatAgent {
    pub fn new(seat: usize, descriptor: Arc<BackendDescriptor>, log: InteractionLog) -> Self {
        Self {
            seat,
            descriptor,
            log,
            history: vec![ChatMessage::system(system_prompt(seat))],
            turn: 0,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    async fn respond(&mut self, observation: &Observation) -> anyhow::Result<serde_json::Value> {
        let client = self.descriptor.client().with_context(|| {
            format!("backend `{}` has no chat endpoint", self.descriptor.type_name)
        })?;
        let model = self.descriptor.model.as_deref().unwrap_or(DEFAULT_MODEL);

        self.history
            .push(ChatMessage::user(serde_json::to_string(observation.as_value())?));
        let reply = client
            .chat(&self.history, model, self.descriptor.temperature)
            .await
            .with_context(|| format!("Player_{} failed to get a reply", self.seat))?;

        let action = parse_action(&reply);
        let mut record = InteractionRecord::new(self.seat, self.turn, observation.as_value(), &action);
        record.prompt = Some(&self.history);
        record.response = Some(&reply);
        self.log.append(&record)?;

        self.history.push(ChatMessage::assistant(reply));
        self.turn += 1;
        tracing::debug!(seat = self.seat, turn = self.turn, "chat agent acted");
        Ok(action)
    }
}

impl Agent for ChatAgent {
    fn seat(&self) -> usize {
        self.seat
    }

    fn reset(&mut self) {
        self.history.truncate(1);
        self.turn = 0;
    }

    fn act<'a>(&'a mut self, observation: &'a Observation) -> AgentFuture<'a> {
        Box::pin(self.respond(observation))
    }
}

/// Factory for chat-model backends.
pub struct ChatAgentFactory {
    served_model: ServedModel,
    requires_port: bool,
}

impl ChatAgentFactory {
    /// Shared gateway: default port, default model.
    pub fn hosted() -> Self {
        Self {
            served_model: ServedModel::Default(DEFAULT_MODEL),
            requires_port: false,
        }
    }

    /// Dedicated inference server serving a model named after the backend.
    pub fn self_hosted() -> Self {
        Self {
            served_model: ServedModel::TypeName,
            requires_port: true,
        }
    }
}

impl AgentFactory for ChatAgentFactory {
    fn kind(&self) -> BackendKind {
        BackendKind::NetworkBackedModel
    }

    fn served_model(&self) -> ServedModel {
        self.served_model
    }

    fn requires_port(&self) -> bool {
        self.requires_port
    }

    fn create(
        &self,
        seat: usize,
        descriptor: Arc<BackendDescriptor>,
        log: InteractionLog,
    ) -> anyhow::Result<Box<dyn Agent>> {
        Ok(Box::new(ChatAgent::new(seat, descriptor, log)))
    }
}
