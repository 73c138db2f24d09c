//! OpenAI-compatible chat completions client.
//!
//! Hosted gateways and self-hosted inference servers (vLLM, SGLang, ...)
//! all expose `POST <base_url>/chat/completions`, so one client covers every
//! network-backed seat. The client is cheap to clone and is shared by all
//! seats of a role group through their backend descriptor.

use super::http_client::{BACKEND_TIMEOUT, build_backend_client};
use super::scrub::sanitize_api_error;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Credential sent to servers that do not check one.
pub const PLACEHOLDER_API_KEY: &str = "EMPTY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    base_url: String,
    /// Pre-computed chat completions URL (avoids `format!` per request).
    cached_chat_url: String,
    /// Pre-computed `Authorization` header value.
    cached_auth: String,
    client: Client,
}

impl ChatCompletionClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.clone()
        } else {
            format!("{base_url}/chat/completions")
        };
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(PLACEHOLDER_API_KEY);

        Self {
            base_url,
            cached_chat_url,
            cached_auth: format!("Bearer {key}"),
            client: build_backend_client(BACKEND_TIMEOUT),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chat_completions_url(&self) -> &str {
        &self.cached_chat_url
    }

    /// Send one chat completion request and return the first choice's text.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String> {
        let request = ChatRequest {
            model,
            messages,
            temperature,
        };

        let response = self
            .client
            .post(self.chat_completions_url())
            .header("Authorization", &self.cached_auth)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("chat completions request to {} failed", self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read backend error body>".to_string());
            anyhow::bail!(
                "backend {} returned {status}: {}",
                self.base_url,
                sanitize_api_error(&body)
            );
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .with_context(|| format!("chat completions JSON decode failed ({})", self.base_url))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("no completion returned by {}", self.base_url))
    }
}
