use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use rolechat_chat::{ChatStore, CompletionEndpoint, EndpointError, MemoryStorage, SessionStorage};
use rolechat_models::{CompletionReply, CompletionRequest};

/// Endpoint that answers from a queue of canned replies and records every request.
///
/// With `gated()`, each request waits for `release()` before answering, and
/// announces itself on `started`.
#[derive(Default)]
pub struct ScriptedEndpoint {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    gated: bool,
    started: Notify,
    release: Notify,
}

impl ScriptedEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }

    pub fn reply(self, content: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(content.to_string()));
        self
    }

    pub fn fail(self, status: u16) -> Self {
        self.replies.lock().unwrap().push_back(Err(status));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl CompletionEndpoint for ScriptedEndpoint {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, EndpointError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(content)) => Ok(CompletionReply { content }),
            Some(Err(status)) => Err(EndpointError::Status {
                status,
                body: "{\"error\":\"Failed to generate response\"}".to_string(),
            }),
            None => Err(EndpointError::Decode("no scripted reply left".to_string())),
        }
    }
}

pub fn store_with(endpoint: Arc<ScriptedEndpoint>, storage: Arc<MemoryStorage>) -> ChatStore {
    ChatStore::open(endpoint, storage).unwrap()
}

/// Endpoint whose request panics mid-flight
pub struct PanickingEndpoint;

#[async_trait]
impl CompletionEndpoint for PanickingEndpoint {
    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionReply, EndpointError> {
        panic!("endpoint blew up");
    }
}

/// In-memory storage whose saves start failing once `break_saves` is called
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    broken: AtomicBool,
}

impl FlakyStorage {
    pub fn break_saves(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn blob(&self) -> Option<String> {
        self.inner.blob()
    }
}

impl SessionStorage for FlakyStorage {
    fn load(&self) -> io::Result<Option<String>> {
        self.inner.load()
    }

    fn save(&self, blob: &str) -> io::Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only disk"));
        }
        self.inner.save(blob)
    }

    fn location(&self) -> String {
        "flaky".to_string()
    }
}
