use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use rolechat_llm_api::{complete_for_role, LlmClient};
use rolechat_models::{ChatMessage, CompletionReply, ErrorBody};
use rolechat_types::ChatRole;

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn LlmClient>,
    pub model: String,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/health", get(health))
        .with_state(state)
}

/// POST /api/chat - Generate the assistant reply for a transcript
///
/// The body is read raw so that a missing or non-array `messages` field can be
/// told apart from a body that is not JSON at all.
async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<CompletionReply>, AppError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Generation(anyhow::anyhow!("Request body is not JSON: {}", e)))?;

    let messages = match payload.get("messages") {
        Some(messages @ Value::Array(_)) => messages.clone(),
        _ => return Err(AppError::InvalidMessages),
    };
    let role = ChatRole::from_name_or_default(payload.get("role").and_then(Value::as_str).unwrap_or_default());

    let messages: Vec<ChatMessage> = serde_json::from_value(messages)
        .map_err(|e| AppError::Generation(anyhow::anyhow!("Malformed message entry: {}", e)))?;

    log::info!("POST /api/chat ({} messages, role {})", messages.len(), role);

    let content = complete_for_role(state.client.as_ref(), role, &messages)
        .await
        .map_err(AppError::Generation)?;

    Ok(Json(CompletionReply { content }))
}

/// GET /api/health - Liveness check
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "model": state.model,
    }))
}

/// Error handling
enum AppError {
    InvalidMessages,
    Generation(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidMessages => (StatusCode::BAD_REQUEST, "Invalid messages format"),
            AppError::Generation(err) => {
                log::error!("Chat API error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate response")
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Replies with a fixed text (or fails) and records what it was sent
    struct FakeClient {
        reply: Option<String>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl FakeClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmClient for FakeClient {
        async fn chat_completion(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.reply.clone().ok_or_else(|| anyhow::anyhow!("upstream unavailable"))
        }
    }

    fn router(client: Arc<FakeClient>) -> Router {
        create_router(AppState {
            client,
            model: "test-model".to_string(),
        })
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_chat_returns_content() {
        let client = FakeClient::replying("Recursion is...");
        let body = json!({
            "messages": [{"role": "user", "content": "explain recursion"}],
            "role": "teacher"
        });

        let (status, reply) = post_chat(router(client.clone()), &body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply, json!({"content": "Recursion is..."}));

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0][0], ChatMessage::system(ChatRole::Teacher.system_prompt()));
        assert_eq!(seen[0][1], ChatMessage::user("explain recursion"));
    }

    #[tokio::test]
    async fn test_unknown_role_uses_assistant_prompt() {
        let client = FakeClient::replying("hi");
        let body = json!({"messages": [{"role": "user", "content": "hello"}], "role": "pirate"});

        let (status, _) = post_chat(router(client.clone()), &body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0][0].content, ChatRole::Assistant.system_prompt());
    }

    #[tokio::test]
    async fn test_missing_role_uses_assistant_prompt() {
        let client = FakeClient::replying("hi");
        let body = json!({"messages": []});

        let (status, _) = post_chat(router(client.clone()), &body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(client.seen.lock().unwrap()[0].len(), 1);
    }

    #[tokio::test]
    async fn test_non_array_messages_is_bad_request() {
        for body in [json!({"role": "teacher"}), json!({"messages": "hello"}), json!({"messages": null})] {
            let client = FakeClient::replying("unused");
            let (status, reply) = post_chat(router(client.clone()), &body.to_string()).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(reply, json!({"error": "Invalid messages format"}));
            assert!(client.seen.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_is_server_error() {
        let body = json!({"messages": [{"role": "user", "content": "hello"}], "role": "support"});

        let (status, reply) = post_chat(router(FakeClient::failing()), &body.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply, json!({"error": "Failed to generate response"}));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_server_error() {
        let (status, reply) = post_chat(router(FakeClient::replying("unused")), "{not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply, json!({"error": "Failed to generate response"}));
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(FakeClient::replying("unused"))
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok", "model": "test-model"}));
    }
}
