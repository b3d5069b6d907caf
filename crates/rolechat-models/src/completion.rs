//! Body shapes of the `/api/chat` completion endpoint.

use serde::{Deserialize, Serialize};

use crate::ChatMessage;
use rolechat_types::{ChatRole, Message};

/// POST body: the full transcript plus the persona to answer as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub role: String,
}

impl CompletionRequest {
    pub fn new(role: ChatRole, transcript: &[Message]) -> Self {
        Self {
            messages: transcript.iter().map(ChatMessage::from).collect(),
            role: role.as_str().to_string(),
        }
    }

    /// Persona named by the request; unknown names answer as the general assistant
    pub fn chat_role(&self) -> ChatRole {
        ChatRole::from_name_or_default(&self.role)
    }
}

/// Successful (200) response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReply {
    pub content: String,
}

/// Error response body (400/500)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let transcript = vec![
            Message::user("1".to_string(), "explain recursion"),
            Message::assistant("2".to_string(), "Recursion is..."),
        ];
        let request = CompletionRequest::new(ChatRole::Teacher, &transcript);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "messages": [
                    { "role": "user", "content": "explain recursion" },
                    { "role": "assistant", "content": "Recursion is..." }
                ],
                "role": "teacher"
            })
        );
    }

    #[test]
    fn test_unknown_role_maps_to_assistant() {
        let request: CompletionRequest =
            serde_json::from_value(json!({ "messages": [], "role": "wizard" })).unwrap();
        assert_eq!(request.chat_role(), ChatRole::Assistant);
    }
}
