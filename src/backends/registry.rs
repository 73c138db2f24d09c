use super::descriptor::{
    BackendDescriptor, BackendKind, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT,
    DEFAULT_TEMPERATURE, Endpoint,
};
use crate::agents::{Agent, ChatAgentFactory, HumanAgentFactory, InteractionLog};
use crate::config::BackendParams;
use crate::error::RegistryError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Environment variable consulted when a role group sets no `api_key`.
pub const API_KEY_ENV: &str = "WEREWOLF_ARENA_API_KEY";

/// Model name a network backend requests when its group names none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedModel {
    /// A fixed default model.
    Default(&'static str),
    /// The server hosts exactly one model, registered under the backend type.
    TypeName,
}

/// Constructor for the seat actors of one backend type.
pub trait AgentFactory: Send + Sync {
    fn kind(&self) -> BackendKind;

    fn served_model(&self) -> ServedModel {
        ServedModel::Default(DEFAULT_MODEL)
    }

    /// Self-hosted servers have no sensible default port.
    fn requires_port(&self) -> bool {
        false
    }

    fn create(
        &self,
        seat: usize,
        descriptor: Arc<BackendDescriptor>,
        log: InteractionLog,
    ) -> anyhow::Result<Box<dyn Agent>>;
}

struct RegistryEntry {
    kind: BackendKind,
    served_model: ServedModel,
    requires_port: bool,
    factory: Arc<dyn AgentFactory>,
}

/// Maps backend type names to agent constructors.
///
/// Populated once at startup and only read afterwards.
pub struct BackendRegistry {
    name: String,
    entries: HashMap<String, RegistryEntry>,
}

impl BackendRegistry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: HashMap::new(),
        }
    }

    /// Registry with the stock backends: hosted chat models (`gpt`, `o1`),
    /// self-hosted fine-tuned models (`sft`, `makto`) and a console `human`.
    pub fn with_builtin_backends() -> Result<Self, RegistryError> {
        let mut registry = Self::new("agents");
        registry.register(&["gpt", "o1"], Arc::new(ChatAgentFactory::hosted()))?;
        registry.register(&["sft", "makto"], Arc::new(ChatAgentFactory::self_hosted()))?;
        registry.register(&["human"], Arc::new(HumanAgentFactory))?;
        Ok(registry)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind every key to `factory`. Nothing is bound if any key is taken.
    pub fn register(
        &mut self,
        keys: &[&str],
        factory: Arc<dyn AgentFactory>,
    ) -> Result<(), RegistryError> {
        for (i, key) in keys.iter().enumerate() {
            if self.entries.contains_key(*key) || keys[..i].contains(key) {
                return Err(RegistryError::DuplicateKey((*key).to_string()));
            }
        }

        let kind = factory.kind();
        let served_model = factory.served_model();
        let requires_port = factory.requires_port();
        for key in keys {
            self.entries.insert(
                (*key).to_string(),
                RegistryEntry {
                    kind,
                    served_model,
                    requires_port,
                    factory: Arc::clone(&factory),
                },
            );
        }
        Ok(())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    pub fn kind(&self, type_name: &str) -> Option<BackendKind> {
        self.entries.get(type_name).map(|entry| entry.kind)
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    fn entry(&self, type_name: &str) -> Result<&RegistryEntry, RegistryError> {
        self.entries
            .get(type_name)
            .ok_or_else(|| RegistryError::UnregisteredType(type_name.to_string()))
    }

    /// Resolve connection parameters into a descriptor.
    pub fn build(
        &self,
        type_name: &str,
        params: &BackendParams,
    ) -> Result<BackendDescriptor, RegistryError> {
        let entry = self.entry(type_name)?;

        match entry.kind {
            BackendKind::InteractiveHuman => Ok(BackendDescriptor::human(type_name)),
            BackendKind::NetworkBackedModel => {
                if entry.requires_port && params.port.is_none() {
                    return Err(RegistryError::MissingPort {
                        backend: type_name.to_string(),
                    });
                }

                let endpoint = Endpoint {
                    host: params
                        .host
                        .as_deref()
                        .map(str::trim)
                        .filter(|h| !h.is_empty())
                        .unwrap_or(DEFAULT_HOST)
                        .to_string(),
                    port: params.port.unwrap_or(DEFAULT_PORT),
                };
                let model = params.model.clone().unwrap_or_else(|| match entry.served_model {
                    ServedModel::Default(model) => model.to_string(),
                    ServedModel::TypeName => type_name.to_string(),
                });
                let temperature = params.temperature.unwrap_or(DEFAULT_TEMPERATURE);
                let api_key = resolve_api_key(params.api_key.as_deref());

                tracing::info!(
                    registry = %self.name,
                    backend = type_name,
                    %endpoint,
                    %model,
                    "backend resolved"
                );
                Ok(BackendDescriptor::network(
                    type_name,
                    endpoint,
                    model,
                    temperature,
                    api_key.as_deref(),
                ))
            }
        }
    }

    /// Instantiate the actor for one seat from a shared descriptor.
    pub fn build_agent(
        &self,
        type_name: &str,
        seat: usize,
        descriptor: Arc<BackendDescriptor>,
        log_path: &Path,
    ) -> anyhow::Result<Box<dyn Agent>> {
        let entry = self.entry(type_name)?;
        let log = InteractionLog::create(log_path)?;
        entry.factory.create(seat, descriptor, log)
    }
}

/// Explicit key first, then [`API_KEY_ENV`].
pub fn resolve_api_key(explicit: Option<&str>) -> Option<String> {
    if let Some(key) = explicit.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
