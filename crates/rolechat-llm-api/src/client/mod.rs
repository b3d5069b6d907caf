use anyhow::Result;
use async_trait::async_trait;

use rolechat_models::ChatMessage;

pub mod groq;

/// LLM client trait - unified interface for all LLM providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Simple chat completion: the full message list in, the reply text out
    async fn chat_completion(&self, messages: &[ChatMessage]) -> Result<String>;
}
