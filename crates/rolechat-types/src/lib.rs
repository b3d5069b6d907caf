//! Core types and structures for rolechat
//!
//! This crate provides the foundational types used across all rolechat crates:
//! the assistant personas, chat messages and chat sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod ids;

pub use ids::IdGenerator;

// ============================================================================
// Constants
// ============================================================================

/// Assistant reply appended to a transcript when the completion request fails
pub const FALLBACK_REPLY: &str = "I'm sorry. Please try again.";

// ============================================================================
// Chat Roles
// ============================================================================

/// Assistant persona a chat session is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Support,
    Teacher,
    #[default]
    Assistant,
}

impl ChatRole {
    /// Every persona, in the order they are offered to the user
    pub const ALL: [ChatRole; 3] = [ChatRole::Support, ChatRole::Teacher, ChatRole::Assistant];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::Support => "support",
            ChatRole::Teacher => "teacher",
            ChatRole::Assistant => "assistant",
        }
    }

    /// Display name shown in session titles and headers
    pub fn title(&self) -> &'static str {
        match self {
            ChatRole::Support => "Customer Support",
            ChatRole::Teacher => "AI Teacher",
            ChatRole::Assistant => "General Assistant",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChatRole::Support => "Get help with services.",
            ChatRole::Teacher => "Learn complex topics.",
            ChatRole::Assistant => "Friendly conversations.",
        }
    }

    /// System prompt sent to the language model for this persona
    pub fn system_prompt(&self) -> &'static str {
        match self {
            ChatRole::Support => {
                "You are a helpful customer support agent. Answer questions about services, pricing, \
                 policies, and troubleshooting in a clear, concise, and professional way. Always maintain \
                 a polite and friendly tone. If you are unsure about something, say \"I don't have that \
                 information right now.\""
            }
            ChatRole::Teacher => {
                "You are an expert teacher and explainer. Break down technical or difficult concepts \
                 (like coding, AI, web development) into easy-to-understand explanations with examples. \
                 Make learning engaging and accessible. Use simple language unless the user requests \
                 detail. Format your answers in a readable way with short paragraphs and bullet points \
                 when useful."
            }
            ChatRole::Assistant => {
                "You are a friendly and helpful general assistant. Engage in friendly conversation, \
                 provide helpful tips, and give structured guidance. Always be concise and to the point. \
                 Stay helpful, polite, and respectful at all times. Avoid unnecessary jargon and keep \
                 language simple."
            }
        }
    }

    /// Title given to a freshly created session, e.g. "AI Teacher Chat"
    pub fn session_title(&self) -> String {
        format!("{} Chat", self.title())
    }

    /// Parse a role name, falling back to the general assistant for anything unknown
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chat role '{0}' (expected support, teacher or assistant)")]
pub struct UnknownRoleError(pub String);

impl FromStr for ChatRole {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "support" => Ok(ChatRole::Support),
            "teacher" => Ok(ChatRole::Teacher),
            "assistant" => Ok(ChatRole::Assistant),
            _ => Err(UnknownRoleError(s.to_string())),
        }
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a chat transcript. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: MessageRole,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(id: String, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }

    pub fn user(id: String, content: impl Into<String>) -> Self {
        Self::new(id, MessageRole::User, content)
    }

    pub fn assistant(id: String, content: impl Into<String>) -> Self {
        Self::new(id, MessageRole::Assistant, content)
    }
}

// ============================================================================
// Chat Sessions
// ============================================================================

/// A conversation thread with a fixed persona and an append-only transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub role: ChatRole,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ChatSession {
    pub fn new(id: String, role: ChatRole) -> Self {
        Self {
            id,
            title: role.session_title(),
            role,
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_session_title_from_role() {
        assert_eq!(ChatRole::Teacher.session_title(), "AI Teacher Chat");
        assert_eq!(ChatRole::Support.session_title(), "Customer Support Chat");
        assert_eq!(ChatRole::Assistant.session_title(), "General Assistant Chat");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("teacher".parse::<ChatRole>(), Ok(ChatRole::Teacher));
        assert_eq!(" Support ".parse::<ChatRole>(), Ok(ChatRole::Support));
        assert!("pirate".parse::<ChatRole>().is_err());
    }

    #[test]
    fn test_unknown_role_falls_back_to_assistant() {
        assert_eq!(ChatRole::from_name_or_default("pirate"), ChatRole::Assistant);
        assert_eq!(ChatRole::from_name_or_default(""), ChatRole::Assistant);
        assert_eq!(ChatRole::from_name_or_default("teacher"), ChatRole::Teacher);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatRole::Support).unwrap();
        assert_eq!(json, "\"support\"");
        let role: MessageRole = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(role, MessageRole::Assistant);
    }

    #[test]
    fn test_session_json_shape() {
        let mut session = ChatSession::new("1700000000000".to_string(), ChatRole::Teacher);
        session.push(Message::user("1700000000001".to_string(), "hi"));

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["id"], "1700000000000");
        assert_eq!(value["title"], "AI Teacher Chat");
        assert_eq!(value["role"], "teacher");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert!(value["messages"][0]["timestamp"].is_string());
    }

    #[test]
    fn test_prompts_are_distinct() {
        let prompts: Vec<&str> = ChatRole::ALL.iter().map(|r| r.system_prompt()).collect();
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
        assert!(ChatRole::Support.system_prompt().contains("customer support"));
    }
}
