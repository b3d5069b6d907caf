use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use std::path::PathBuf;

use crate::app::setup::open_session_store;
use crate::cli::SessionCommands;
use rolechat_chat::ChatStore;
use rolechat_types::{ChatSession, MessageRole};

pub(crate) fn local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// One line per session: id, title, message count and the last activity
pub fn render_session_list(sessions: &[ChatSession], active_id: Option<&str>) -> String {
    if sessions.is_empty() {
        return "No chat sessions".to_string();
    }

    sessions
        .iter()
        .map(|session| {
            let marker = if Some(session.id.as_str()) == active_id { "*" } else { " " };
            let last = session
                .last_message()
                .map(|m| local_time(&m.timestamp))
                .unwrap_or_else(|| "empty".to_string());
            format!(
                "{} {}  {}  ({} messages, {})",
                marker,
                session.id.bright_black(),
                session.title.bold(),
                session.message_count(),
                last
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full transcript of one session
pub fn render_transcript(session: &ChatSession) -> String {
    let mut out = format!("{} [{}]", session.title.bold(), session.id.bright_black());
    for message in &session.messages {
        let speaker = match message.role {
            MessageRole::User => "You".bright_green().bold(),
            MessageRole::Assistant => session.role.title().bright_cyan().bold(),
        };
        out.push_str(&format!(
            "\n{} {}: {}",
            local_time(&message.timestamp).bright_black(),
            speaker,
            message.content
        ));
    }
    out
}

/// Execute a `sessions` subcommand against an open store
pub fn execute(store: &ChatStore, command: &SessionCommands) -> Result<String> {
    match command {
        SessionCommands::List => Ok(render_session_list(&store.sessions(), None)),
        SessionCommands::Show { id } => store
            .session(id)
            .map(|session| render_transcript(&session))
            .ok_or_else(|| anyhow::anyhow!("No session with id {}", id)),
        SessionCommands::Delete { id } => {
            if store.delete_session(id)? {
                Ok(format!("Deleted session {}", id))
            } else {
                anyhow::bail!("No session with id {}", id)
            }
        }
        SessionCommands::Clear => {
            let count = store.sessions().len();
            store.delete_all_sessions()?;
            Ok(format!("Deleted {} sessions", count))
        }
    }
}

pub fn run_sessions_command(command: &SessionCommands, state_file: Option<PathBuf>) -> Result<String> {
    let store = open_session_store(state_file)?;
    execute(&store, command)
}
