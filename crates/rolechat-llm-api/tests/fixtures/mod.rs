use serde_json::json;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock server utilities for testing the OpenAI-compatible client
pub struct LLMMockServer {
    server: MockServer,
}

impl LLMMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.server.uri())
    }

    /// Mock successful Groq API response
    pub async fn mock_groq_success(&self, response_content: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl_test123",
                "object": "chat.completion",
                "created": 1700000000,
                "model": "llama-3.3-70b-versatile",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": response_content
                    },
                    "finish_reason": "stop"
                }],
                "usage": {
                    "prompt_tokens": 10,
                    "completion_tokens": 20,
                    "total_tokens": 30
                }
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock a response without any choices
    pub async fn mock_empty_choices(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl_empty",
                "choices": []
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock Groq rate limit error
    pub async fn mock_rate_limit(&self) {
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({
                        "error": {
                            "type": "rate_limit_error",
                            "message": "Rate limit exceeded"
                        }
                    }))
                    .insert_header("Retry-After", "60"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock server error
    pub async fn mock_server_error(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "Internal server error"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a response that arrives after `delay`
    pub async fn mock_slow(&self, delay: std::time::Duration) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}
