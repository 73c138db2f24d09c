use crate::llm::ChatCompletionClient;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Model requested from hosted chat backends when the group names none.
pub const DEFAULT_MODEL: &str = "qwen-8b-werewolf";

/// Fixed classification of a backend type, decided when it is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackendKind {
    /// Reached over HTTP at an OpenAI-compatible endpoint.
    NetworkBackedModel,
    /// A person at the console; no connection at all.
    InteractiveHuman,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/v1", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())
    }
}

/// Resolved, reusable connection and model identity of one role group.
///
/// Built once per distinct (type, params) pair and shared read-only by every
/// seat the group serves.
#[derive(Debug)]
pub struct BackendDescriptor {
    pub type_name: String,
    pub kind: BackendKind,
    pub endpoint: Option<Endpoint>,
    pub model: Option<String>,
    pub temperature: f64,
    client: Option<ChatCompletionClient>,
}

impl BackendDescriptor {
    pub fn network(
        type_name: &str,
        endpoint: Endpoint,
        model: String,
        temperature: f64,
        api_key: Option<&str>,
    ) -> Self {
        let client = ChatCompletionClient::new(&endpoint.base_url(), api_key);
        Self {
            type_name: type_name.to_string(),
            kind: BackendKind::NetworkBackedModel,
            endpoint: Some(endpoint),
            model: Some(model),
            temperature,
            client: Some(client),
        }
    }

    pub fn human(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            kind: BackendKind::InteractiveHuman,
            endpoint: None,
            model: None,
            temperature: 0.0,
            client: None,
        }
    }

    /// Shared chat client; `None` for non-networked backends.
    pub fn client(&self) -> Option<&ChatCompletionClient> {
        self.client.as_ref()
    }
}
