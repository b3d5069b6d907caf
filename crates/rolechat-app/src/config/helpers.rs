use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::LlmArgs;
use rolechat_chat::{FileStorage, MemoryStorage, SessionStorage};
use rolechat_llm_api::{ClientFactory, ClientOptions, LlmClient};

/// Build the client options for a language model client from CLI settings
pub fn client_options(llm: &LlmArgs, timeout_secs: Option<u64>, verbose: bool) -> ClientOptions {
    ClientOptions {
        timeout: timeout_secs.map(Duration::from_secs),
        temperature: llm.temperature,
        max_tokens: llm.max_tokens,
        verbose,
        log_to_file: llm.log_requests,
    }
}

/// Create the language model client; a missing API key is an error here
pub fn create_llm_client(llm: &LlmArgs, timeout_secs: Option<u64>, verbose: bool) -> Result<Arc<dyn LlmClient>> {
    ClientFactory::create(
        llm.backend,
        llm.api_key.clone(),
        llm.model.clone(),
        llm.api_url.clone(),
        client_options(llm, timeout_secs, verbose),
    )
    .with_context(|| format!("Failed to set up the {} language model client", llm.backend))
}

/// Session storage: in memory when `ephemeral`, otherwise the given file or
/// `~/.rolechat/chat_sessions.json`
pub fn create_storage(state_file: Option<PathBuf>, ephemeral: bool) -> Result<Arc<dyn SessionStorage>> {
    if ephemeral {
        return Ok(Arc::new(MemoryStorage::new()));
    }
    let storage = match state_file {
        Some(path) => FileStorage::new(path),
        None => FileStorage::default_location().context("Failed to locate the session state file")?,
    };
    Ok(Arc::new(storage))
}

pub fn parse_bind_addr(bind: &str, port: u16) -> Result<SocketAddr> {
    format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))
}
