// Models module - data structures for API communication
pub mod completion;
pub mod requests;
pub mod responses;

use serde::{Deserialize, Deserializer, Serialize};

// Re-export commonly used types
pub use completion::{CompletionReply, CompletionRequest, ErrorBody};
pub use requests::ChatRequest;
pub use responses::{ChatResponse, Choice, Usage};

/// Helper function to deserialize string or null values
pub fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// Role/content pair, the message shape shared by the completion endpoint
/// and OpenAI-compatible chat APIs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

impl From<&rolechat_types::Message> for ChatMessage {
    fn from(message: &rolechat_types::Message) -> Self {
        Self::new(message.role.as_str(), message.content.clone())
    }
}
