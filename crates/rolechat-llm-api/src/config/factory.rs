use anyhow::Result;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::client::{groq::GroqLlmClient, LlmClient};
use crate::config::{get_default_url_for_backend, normalize_api_url, BackendType};

/// Tuning knobs applied to every client the factory builds
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub timeout: Option<Duration>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub verbose: bool,
    pub log_to_file: bool,
}

/// Client factory for creating LLM clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create an LLM client based on the specified backend type
    ///
    /// # Arguments
    /// * `backend` - The backend type to use (Groq, OpenAI)
    /// * `api_key` - API key; falls back to the backend's environment variable
    /// * `model` - Model name to use
    /// * `api_url` - Optional custom API URL (uses default if None)
    /// * `options` - Timeout, sampling and debug logging settings
    ///
    /// # Returns
    /// Arc-wrapped LLM client implementing the LlmClient trait
    pub fn create(
        backend: BackendType,
        api_key: Option<String>,
        model: String,
        api_url: Option<String>,
        options: ClientOptions,
    ) -> Result<Arc<dyn LlmClient>> {
        let key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env::var(backend.api_key_env_var()).ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key for the {} backend: pass --api-key or set {}",
                    backend,
                    backend.api_key_env_var()
                )
            })?;

        let url = api_url
            .map(|u| normalize_api_url(&u))
            .unwrap_or_else(|| get_default_url_for_backend(backend).to_string());

        // OpenAI uses the same client as Groq (OpenAI-compatible)
        let mut client = GroqLlmClient::new(key, model, url)
            .with_sampling(options.temperature, options.max_tokens)
            .with_debug_logging(options.verbose, options.log_to_file);
        if let Some(timeout) = options.timeout {
            client = client.with_timeout(timeout)?;
        }

        log::debug!("Created {} client for model {} at {}", backend, client.model(), client.api_url());
        Ok(Arc::new(client))
    }
}
