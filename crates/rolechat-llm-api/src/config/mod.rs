use std::fmt;
use std::str::FromStr;

pub mod factory;
pub use factory::{ClientFactory, ClientOptions};

/// Backend type for LLM models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendType {
    #[default]
    Groq,
    OpenAI,
}

impl BackendType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAI => "openai",
        }
    }

    /// Environment variable holding the API key for this backend
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "openai" => Ok(Self::OpenAI),
            other => Err(anyhow::anyhow!("Unknown backend '{}' (expected groq or openai)", other)),
        }
    }
}

/// Default Groq API URL
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default OpenAI API URL
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Get the default URL for a given backend type
pub fn get_default_url_for_backend(backend: BackendType) -> &'static str {
    match backend {
        BackendType::Groq => GROQ_API_URL,
        BackendType::OpenAI => OPENAI_API_URL,
    }
}

/// Normalize API URL by ensuring it has the correct path for OpenAI-compatible endpoints
pub fn normalize_api_url(url: &str) -> String {
    // If URL already contains a path with "completions", use it as-is
    if url.contains("/completions") || url.contains("/chat") {
        return url.to_string();
    }

    if url.ends_with('/') {
        format!("{}v1/chat/completions", url)
    } else {
        format!("{}/v1/chat/completions", url)
    }
}
