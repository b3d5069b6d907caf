use anyhow::Result;

use crate::client::LlmClient;
use rolechat_models::ChatMessage;
use rolechat_types::ChatRole;

/// Answer a transcript as the given persona.
///
/// The persona's system prompt is placed ahead of the transcript; the
/// transcript itself is forwarded unchanged.
pub async fn complete_for_role(
    client: &dyn LlmClient,
    role: ChatRole,
    messages: &[ChatMessage],
) -> Result<String> {
    let mut request = Vec::with_capacity(messages.len() + 1);
    request.push(ChatMessage::system(role.system_prompt()));
    request.extend_from_slice(messages);

    log::debug!("Requesting {} completion with {} messages", role, messages.len());
    client.chat_completion(&request).await
}
