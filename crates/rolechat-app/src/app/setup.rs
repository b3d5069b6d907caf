use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::{ChatArgs, DEFAULT_ENDPOINT};
use crate::config::{create_llm_client, create_storage};
use rolechat_chat::{ChatStore, CompletionEndpoint, DirectCompletionEndpoint, HttpCompletionEndpoint, SessionStorage};

/// Pick the completion endpoint for `chat`: the in-process model client with
/// `--direct`, otherwise a running server
pub fn create_endpoint(args: &ChatArgs, verbose: bool) -> Result<Arc<dyn CompletionEndpoint>> {
    if args.direct {
        let client = create_llm_client(&args.llm, args.timeout, verbose)?;
        return Ok(Arc::new(DirectCompletionEndpoint::new(client)));
    }

    let mut endpoint = HttpCompletionEndpoint::new(&args.endpoint);
    if let Some(secs) = args.timeout {
        endpoint = endpoint
            .with_timeout(Duration::from_secs(secs))
            .context("Failed to build HTTP client")?;
    }
    log::debug!("Using completion endpoint {}", endpoint.url());
    Ok(Arc::new(endpoint))
}

fn open_store(endpoint: Arc<dyn CompletionEndpoint>, storage: Arc<dyn SessionStorage>) -> Result<ChatStore> {
    let location = storage.location();
    ChatStore::open(endpoint, storage).with_context(|| format!("Failed to load chat sessions from {}", location))
}

/// Store backing the interactive chat
pub fn open_chat_store(args: &ChatArgs, verbose: bool) -> Result<Arc<ChatStore>> {
    let endpoint = create_endpoint(args, verbose)?;
    let storage = create_storage(args.state_file.clone(), args.ephemeral)?;
    let store = open_store(endpoint, storage)?;
    store.set_default_role(args.role);
    Ok(Arc::new(store))
}

/// Store for the `sessions` subcommands. They never send, so the endpoint is
/// only a placeholder pointing at the default server.
pub fn open_session_store(state_file: Option<PathBuf>) -> Result<ChatStore> {
    let storage = create_storage(state_file, false)?;
    open_store(Arc::new(HttpCompletionEndpoint::new(DEFAULT_ENDPOINT)), storage)
}
