use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use rolechat_llm_api::{BackendType, DEFAULT_MODEL};
use rolechat_types::ChatRole;

/// Where `chat` looks for a completion server unless told otherwise
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

/// CLI arguments for rolechat
#[derive(Parser, Debug)]
#[command(name = "rolechat")]
#[command(about = "Role-based AI chat: completion server and terminal chat client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose debug output (debug log level, HTTP request and response dumps)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP completion server (POST /api/chat)
    Serve(ServeArgs),

    /// Chat interactively in the terminal
    Chat(ChatArgs),

    /// Inspect or remove stored chat sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,

        /// Session state file (default: ~/.rolechat/chat_sessions.json)
        #[arg(long, value_name = "PATH", env = "ROLECHAT_STATE_FILE", global = true)]
        state_file: Option<PathBuf>,
    },

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Language model settings shared by `serve` and `chat --direct`
#[derive(Args, Debug, Clone)]
pub struct LlmArgs {
    /// Model name
    #[arg(long, value_name = "MODEL", env = "ROLECHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Backend type (groq, openai)
    #[arg(long, value_name = "BACKEND", env = "ROLECHAT_BACKEND", default_value = "groq")]
    pub backend: BackendType,

    /// Custom API URL; bare base URLs get /v1/chat/completions appended
    #[arg(long, value_name = "URL", env = "ROLECHAT_API_URL")]
    pub api_url: Option<String>,

    /// API key (default: GROQ_API_KEY or OPENAI_API_KEY, depending on backend)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Sampling temperature passed to the model
    #[arg(long, value_name = "TEMP", env = "ROLECHAT_TEMPERATURE")]
    pub temperature: Option<f32>,

    /// Upper bound on reply length in tokens
    #[arg(long, value_name = "N", env = "ROLECHAT_MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// Write every language model request and response under ~/.rolechat/logs
    #[arg(long)]
    pub log_requests: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1", env = "ROLECHAT_BIND")]
    pub bind: String,

    /// Port
    #[arg(long, default_value = "3000", env = "ROLECHAT_PORT")]
    pub port: u16,

    /// Give up on a language model request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    /// Base URL of a running rolechat server
    #[arg(long, value_name = "URL", env = "ROLECHAT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Call the language model in-process instead of going through a server
    #[arg(long)]
    pub direct: bool,

    /// Role for new sessions (support, teacher, assistant)
    #[arg(long, short = 'r', default_value = "assistant")]
    pub role: ChatRole,

    /// Session state file (default: ~/.rolechat/chat_sessions.json)
    #[arg(long, value_name = "PATH", env = "ROLECHAT_STATE_FILE", conflicts_with = "ephemeral")]
    pub state_file: Option<PathBuf>,

    /// Keep sessions in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Give up on a request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommands {
    /// List stored sessions, newest first
    List,

    /// Print one session's transcript
    Show {
        /// Session id
        id: String,
    },

    /// Delete one session
    Delete {
        /// Session id
        id: String,
    },

    /// Delete all sessions
    Clear,
}
