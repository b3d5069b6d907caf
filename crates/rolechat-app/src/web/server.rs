use anyhow::{Context, Result};
use colored::Colorize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::web::routes::{self, AppState};
use rolechat_llm_api::LlmClient;

/// Web server configuration
pub struct WebServerConfig {
    pub bind_addr: SocketAddr,
    pub model: String,
}

/// Completion server instance
pub struct WebServer {
    config: WebServerConfig,
    client: Arc<dyn LlmClient>,
}

impl WebServer {
    pub fn new(config: WebServerConfig, client: Arc<dyn LlmClient>) -> Self {
        Self { config, client }
    }

    /// Router with the permissive CORS layer the browser front end needs
    pub fn router(&self) -> axum::Router {
        let state = AppState {
            client: self.client.clone(),
            model: self.config.model.clone(),
        };

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(state).layer(cors)
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.bind_addr))?;

        println!("{} Completion server listening on http://{}", "🌐".bright_cyan(), self.config.bind_addr);
        println!("   Chat endpoint: POST http://{}/api/chat", self.config.bind_addr);
        println!("   Health check:  GET  http://{}/api/health", self.config.bind_addr);
        log::info!("Serving model {} on {}", self.config.model, self.config.bind_addr);

        axum::serve(listener, app).await?;
        Ok(())
    }
}
