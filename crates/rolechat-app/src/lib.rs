//! rolechat application library
//!
//! CLI definition, configuration, the terminal chat front end and the HTTP
//! completion server.

pub use rolechat_chat as chat;
pub use rolechat_llm_api as llm_api;
pub use rolechat_types as types;

pub mod app;
pub mod cli;
pub mod config;
pub mod web;

pub use app::{run_repl_mode, run_sessions_command, run_web_server};
pub use cli::{ChatArgs, Cli, Commands, LlmArgs, ServeArgs, SessionCommands};
