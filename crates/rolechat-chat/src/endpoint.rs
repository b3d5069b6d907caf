use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::error::EndpointError;
use rolechat_llm_api::{complete_for_role, LlmClient};
use rolechat_logging::safe_truncate;
use rolechat_models::{CompletionReply, CompletionRequest};

/// Remote text-generation endpoint the store sends transcripts to
#[async_trait]
pub trait CompletionEndpoint: Send + Sync {
    /// One request per send; no streaming, no retry
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, EndpointError>;
}

/// Resolve the `/api/chat` URL for a server base URL
pub fn chat_endpoint_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/api/chat") {
        base.to_string()
    } else {
        format!("{}/api/chat", base)
    }
}

/// Completion endpoint reached over HTTP (`POST /api/chat`)
pub struct HttpCompletionEndpoint {
    url: String,
    client: reqwest::Client,
}

impl HttpCompletionEndpoint {
    pub fn new(base_url: &str) -> Self {
        Self {
            url: chat_endpoint_url(base_url),
            client: reqwest::Client::new(),
        }
    }

    /// Give up on a request after `timeout`; a timed out request counts as failed
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, EndpointError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionEndpoint for HttpCompletionEndpoint {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, EndpointError> {
        log::debug!("POST {} ({} messages, role {})", self.url, request.messages.len(), request.role);

        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(EndpointError::Status {
                status: status.as_u16(),
                body: safe_truncate(&body, 300),
            });
        }

        serde_json::from_str(&body).map_err(|e| EndpointError::Decode(e.to_string()))
    }
}

/// Completion endpoint served in-process: the role-prompted completion the
/// HTTP server would run, without the server
pub struct DirectCompletionEndpoint {
    client: Arc<dyn LlmClient>,
}

impl DirectCompletionEndpoint {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompletionEndpoint for DirectCompletionEndpoint {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, EndpointError> {
        let content = complete_for_role(self.client.as_ref(), request.chat_role(), &request.messages)
            .await
            .map_err(EndpointError::Upstream)?;
        Ok(CompletionReply { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_endpoint_url() {
        assert_eq!(chat_endpoint_url("http://127.0.0.1:3000"), "http://127.0.0.1:3000/api/chat");
        assert_eq!(chat_endpoint_url("http://127.0.0.1:3000/"), "http://127.0.0.1:3000/api/chat");
        assert_eq!(chat_endpoint_url("https://example.com/api/chat"), "https://example.com/api/chat");
    }
}
