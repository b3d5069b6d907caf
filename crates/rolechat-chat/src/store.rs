use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::endpoint::CompletionEndpoint;
use crate::error::StoreError;
use crate::storage::{decode_sessions, encode_sessions, SessionStorage};
use rolechat_models::CompletionRequest;
use rolechat_types::{ChatRole, ChatSession, IdGenerator, Message, FALLBACK_REPLY};

/// Whether a completion request is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Idle,
    AwaitingResponse,
}

/// Why `send_message` did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The text was empty or whitespace only
    EmptyInput,
    /// Another send is still waiting for its reply
    Busy,
}

/// Result of `ChatStore::send_message`
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    Ignored(IgnoredReason),
    /// An assistant message was appended; `fallback` is true when it is the
    /// canned apology standing in for a failed request
    Replied {
        session_id: String,
        reply: Message,
        fallback: bool,
    },
    /// The target session was deleted before the reply arrived
    Discarded { session_id: String },
}

struct Sessions {
    /// Newest first
    list: Vec<ChatSession>,
    active_id: Option<String>,
    default_role: ChatRole,
}

impl Sessions {
    fn find(&self, id: &str) -> Option<&ChatSession> {
        self.list.iter().find(|s| s.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut ChatSession> {
        self.list.iter_mut().find(|s| s.id == id)
    }
}

/// Clears the pending flag when dropped, whatever way the send ends
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Chat sessions, the active selection and the single-flight send gate.
///
/// The store is shared by reference (`Arc<ChatStore>`); every method takes
/// `&self`. At most one `send_message` is in flight per store, across all
/// sessions. The session list is written to storage after every mutation.
///
/// Saves run synchronously while the session lock is held, so the stored blob
/// always matches the latest in-memory list. Storage is a single small file
/// for one user; `send_message` never holds the lock across the completion
/// request, which is the only slow step.
pub struct ChatStore {
    sessions: Mutex<Sessions>,
    pending: AtomicBool,
    ids: IdGenerator,
    endpoint: Arc<dyn CompletionEndpoint>,
    storage: Arc<dyn SessionStorage>,
}

impl ChatStore {
    /// Load the stored sessions and build a store around them.
    ///
    /// A stored blob that does not decode is reported as
    /// [`StoreError::CorruptState`]; nothing is overwritten.
    pub fn open(
        endpoint: Arc<dyn CompletionEndpoint>,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, StoreError> {
        let location = storage.location();
        let list = match storage.load() {
            Ok(Some(blob)) => decode_sessions(&blob).map_err(|source| StoreError::CorruptState {
                location: location.clone(),
                source,
            })?,
            Ok(None) => Vec::new(),
            Err(source) => return Err(StoreError::Storage { location, source }),
        };

        let ids = IdGenerator::seeded_past(
            list.iter()
                .flat_map(|s| std::iter::once(s.id.as_str()).chain(s.messages.iter().map(|m| m.id.as_str()))),
        );
        log::debug!("Loaded {} chat sessions from {}", list.len(), location);

        Ok(Self {
            sessions: Mutex::new(Sessions {
                list,
                active_id: None,
                default_role: ChatRole::default(),
            }),
            pending: AtomicBool::new(false),
            ids,
            endpoint,
            storage,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, sessions: &Sessions) -> Result<(), StoreError> {
        let blob = encode_sessions(&sessions.list)?;
        self.storage.save(&blob).map_err(|source| StoreError::Storage {
            location: self.storage.location(),
            source,
        })
    }

    /// Single code path for session creation, shared by `create_session`
    /// and the implicit creation in `send_message`
    fn insert_session(&self, sessions: &mut Sessions, role: ChatRole) -> String {
        let session = ChatSession::new(self.ids.next_id(), role);
        let id = session.id.clone();
        sessions.list.insert(0, session);
        sessions.active_id = Some(id.clone());
        sessions.default_role = role;
        log::debug!("Created {} session {}", role, id);
        id
    }

    /// Start a new, empty session at the front of the list and make it active.
    /// `role` also becomes the default for sessions created implicitly later.
    pub fn create_session(&self, role: ChatRole) -> Result<String, StoreError> {
        let mut sessions = self.lock();
        let previous_active = sessions.active_id.clone();
        let previous_role = sessions.default_role;
        let id = self.insert_session(&mut sessions, role);
        if let Err(e) = self.persist(&sessions) {
            sessions.list.remove(0);
            sessions.active_id = previous_active;
            sessions.default_role = previous_role;
            return Err(e);
        }
        Ok(id)
    }

    /// Send user text to the active session and append the assistant's reply.
    ///
    /// Empty input and sends made while another is pending are ignored. The
    /// user message is appended before the request goes out; a failed request
    /// appends [`FALLBACK_REPLY`] instead of a reply. The reply always lands
    /// in the session the request was made for, even if another session has
    /// been selected meanwhile.
    ///
    /// If saving the user message fails, the message (and a session created
    /// for it) is taken back out and the error is returned; no request is made.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome, StoreError> {
        let content = text.trim();
        if content.is_empty() {
            return Ok(SendOutcome::Ignored(IgnoredReason::EmptyInput));
        }
        let Some(_pending) = PendingGuard::acquire(&self.pending) else {
            log::debug!("Ignoring send while a reply is pending");
            return Ok(SendOutcome::Ignored(IgnoredReason::Busy));
        };

        let (session_id, request) = {
            let mut sessions = self.lock();
            let active_index = sessions
                .active_id
                .as_deref()
                .and_then(|id| sessions.list.iter().position(|s| s.id == id));
            let previous_active = sessions.active_id.clone();
            let index = match active_index {
                Some(index) => index,
                None => {
                    let role = sessions.default_role;
                    self.insert_session(&mut sessions, role);
                    0
                }
            };

            let session = &mut sessions.list[index];
            session.push(Message::user(self.ids.next_id(), content));
            let session_id = session.id.clone();
            let request = CompletionRequest::new(session.role, &session.messages);

            if let Err(e) = self.persist(&sessions) {
                if active_index.is_none() {
                    sessions.list.remove(0);
                    sessions.active_id = previous_active;
                } else {
                    sessions.list[index].messages.pop();
                }
                return Err(e);
            }
            (session_id, request)
        };

        let (reply_content, fallback) = match self.endpoint.complete(&request).await {
            Ok(reply) => (reply.content, false),
            Err(e) => {
                log::error!("Completion request for session {} failed: {}", session_id, e);
                (FALLBACK_REPLY.to_string(), true)
            }
        };

        let mut sessions = self.lock();
        let reply = Message::assistant(self.ids.next_id(), reply_content);
        match sessions.find_mut(&session_id) {
            Some(session) => session.push(reply.clone()),
            None => {
                log::warn!("Session {} was deleted before its reply arrived; dropping reply", session_id);
                return Ok(SendOutcome::Discarded { session_id });
            }
        }
        self.persist(&sessions)?;

        Ok(SendOutcome::Replied {
            session_id,
            reply,
            fallback,
        })
    }

    /// Remove one session. Deleting the active session clears the selection.
    /// Returns false when no session has that id.
    pub fn delete_session(&self, id: &str) -> Result<bool, StoreError> {
        let mut sessions = self.lock();
        let before = sessions.list.len();
        sessions.list.retain(|s| s.id != id);
        if sessions.list.len() == before {
            return Ok(false);
        }
        if sessions.active_id.as_deref() == Some(id) {
            sessions.active_id = None;
        }
        self.persist(&sessions)?;
        Ok(true)
    }

    pub fn delete_all_sessions(&self) -> Result<(), StoreError> {
        let mut sessions = self.lock();
        sessions.list.clear();
        sessions.active_id = None;
        self.persist(&sessions)
    }

    /// Make `id` the active session. An unknown id leaves no session active
    /// and returns false.
    pub fn select_session(&self, id: &str) -> bool {
        let mut sessions = self.lock();
        let exists = sessions.find(id).is_some();
        sessions.active_id = exists.then(|| id.to_string());
        exists
    }

    /// Snapshot of all sessions, newest first
    pub fn sessions(&self) -> Vec<ChatSession> {
        self.lock().list.clone()
    }

    pub fn session(&self, id: &str) -> Option<ChatSession> {
        self.lock().find(id).cloned()
    }

    pub fn active_session(&self) -> Option<ChatSession> {
        let sessions = self.lock();
        sessions.active_id.as_deref().and_then(|id| sessions.find(id)).cloned()
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.lock().active_id.clone()
    }

    pub fn default_role(&self) -> ChatRole {
        self.lock().default_role
    }

    /// Role used when `send_message` has to create a session itself
    pub fn set_default_role(&self, role: ChatRole) {
        self.lock().default_role = role;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn state(&self) -> StoreState {
        if self.is_pending() {
            StoreState::AwaitingResponse
        } else {
            StoreState::Idle
        }
    }
}
