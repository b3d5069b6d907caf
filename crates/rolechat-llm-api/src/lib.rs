//! # rolechat-llm-api
//!
//! Language model access for rolechat: a small `LlmClient` trait, an
//! OpenAI-compatible client used for Groq and OpenAI, and the role-prompted
//! completion that turns a chat transcript into an assistant reply.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rolechat_llm_api::{complete_for_role, BackendType, ClientFactory, ClientOptions};
//! use rolechat_models::ChatMessage;
//! use rolechat_types::ChatRole;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ClientFactory::create(
//!         BackendType::Groq,
//!         Some("your-api-key".to_string()),
//!         "llama-3.3-70b-versatile".to_string(),
//!         None,
//!         ClientOptions::default(),
//!     )?;
//!
//!     let messages = vec![ChatMessage::user("explain recursion")];
//!     let reply = complete_for_role(client.as_ref(), ChatRole::Teacher, &messages).await?;
//!     println!("{}", reply);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod completion;
pub mod config;


// Re-export commonly used types
pub use client::{groq::GroqLlmClient, LlmClient};
pub use completion::complete_for_role;
pub use config::{
    get_default_url_for_backend,
    normalize_api_url,
    BackendType,
    ClientFactory,
    ClientOptions,
    DEFAULT_MODEL,
    GROQ_API_URL,
    OPENAI_API_URL,
};
pub use rolechat_models::ChatMessage;
