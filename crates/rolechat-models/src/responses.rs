use serde::Deserialize;

use crate::ChatMessage;

/// Token usage information from API response
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// Chat API response structure
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Choice structure within chat response
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[serde(default)]
    pub index: Option<i32>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if the API produced one
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|choice| choice.message.content)
    }
}
