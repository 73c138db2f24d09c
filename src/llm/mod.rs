pub mod chat;
pub mod http_client;
pub mod scrub;

pub use chat::{ChatCompletionClient, ChatMessage, ChatRole, PLACEHOLDER_API_KEY};
pub use http_client::{BACKEND_TIMEOUT, build_backend_client};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
