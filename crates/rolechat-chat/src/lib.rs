//! Chat session management for rolechat
//!
//! This crate provides the chat session store: the list of conversations,
//! the active selection and the single in-flight completion request, plus
//! the two seams it talks through (session storage and the completion
//! endpoint).

pub mod endpoint;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use endpoint::{chat_endpoint_url, CompletionEndpoint, DirectCompletionEndpoint, HttpCompletionEndpoint};
pub use error::{EndpointError, StoreError};
pub use storage::{decode_sessions, encode_sessions, FileStorage, MemoryStorage, SessionStorage};
pub use store::{ChatStore, IgnoredReason, SendOutcome, StoreState};
