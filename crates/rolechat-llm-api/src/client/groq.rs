use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

use crate::client::LlmClient;
use rolechat_logging::{
    log_request, log_request_to_file, log_response, log_response_to_file, safe_truncate,
};
use rolechat_models::{ChatMessage, ChatRequest, ChatResponse};

/// OpenAI-compatible chat completions client (Groq, OpenAI)
pub struct GroqLlmClient {
    api_key: String,
    model: String,
    api_url: String,
    client: reqwest::Client,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    verbose: bool,
    log_to_file: bool,
}

impl GroqLlmClient {
    pub fn new(api_key: String, model: String, api_url: String) -> Self {
        Self {
            api_key,
            model,
            api_url,
            client: reqwest::Client::new(),
            temperature: None,
            max_tokens: None,
            verbose: false,
            log_to_file: false,
        }
    }

    /// Replace the HTTP client with one that gives up after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(self)
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Dump requests and responses to stderr and/or `~/.rolechat/logs`
    pub fn with_debug_logging(mut self, verbose: bool, log_to_file: bool) -> Self {
        self.verbose = verbose;
        self.log_to_file = log_to_file;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_request(&self, messages: &[ChatMessage]) -> ChatRequest {
        let mut request = ChatRequest::new(self.model.clone(), messages.to_vec());
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;
        request
    }
}

#[async_trait]
impl LlmClient for GroqLlmClient {
    async fn chat_completion(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = serde_json::to_value(self.build_request(messages))
            .context("Failed to serialize chat request")?;

        let timestamp = Utc::now().timestamp_millis();
        log_request(&self.api_url, &request, &self.api_key, self.verbose);
        if self.log_to_file {
            if let Err(e) = log_request_to_file(&self.api_url, &request, &self.model, &self.api_key, timestamp) {
                log::warn!("Could not write request log: {:#}", e);
            }
        }

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.api_url))?;

        let status = response.status();
        let response_text = response.text().await.context("Failed to read response body")?;

        log_response(status, &response_text, self.verbose);
        if self.log_to_file {
            if let Err(e) = log_response_to_file(status, &response_text, &self.model, timestamp) {
                log::warn!("Could not write response log: {:#}", e);
            }
        }

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "API request failed: {} - {}",
                status,
                safe_truncate(&response_text, 500)
            ));
        }

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .context("Failed to decode chat completion response")?;

        if let Some(usage) = &chat_response.usage {
            log::debug!(
                "{} tokens used ({} prompt, {} completion)",
                usage.total_tokens,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        chat_response
            .first_content()
            .ok_or_else(|| anyhow::anyhow!("No content in response"))
    }
}
