use reqwest::Client;
use std::time::Duration;

/// Self-hosted inference servers can take minutes on a long game transcript.
pub const BACKEND_TIMEOUT: Duration = Duration::from_secs(300);

/// Pooled client shared by every seat of one backend descriptor.
pub fn build_backend_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        })
}
