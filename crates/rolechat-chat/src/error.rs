use thiserror::Error;

/// Errors raised by the chat session store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the session storage failed
    #[error("failed to access session storage at {location}: {source}")]
    Storage {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored session blob could not be decoded
    #[error("stored chat sessions at {location} are malformed: {source}")]
    CorruptState {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize chat sessions: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised while asking the completion endpoint for a reply
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode completion reply: {0}")]
    Decode(String),

    #[error("completion failed: {0:#}")]
    Upstream(anyhow::Error),
}
