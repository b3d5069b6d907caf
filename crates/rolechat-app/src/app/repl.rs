use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

use crate::app::sessions::{local_time, render_session_list, render_transcript};
use crate::app::setup::open_chat_store;
use crate::cli::ChatArgs;
use rolechat_chat::{ChatStore, IgnoredReason, SendOutcome};
use rolechat_types::{ChatRole, Message};

/// A line typed at the chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    Help,
    /// `/new [role]`, falling back to the current default role
    New(Option<ChatRole>),
    /// `/role <role>`: default role for the next session
    Role(ChatRole),
    List,
    Switch(String),
    Delete(String),
    Clear,
    Send(String),
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == "exit" || line == "quit" {
            return Self::Exit;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Self::Send(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match (name, arg) {
            ("help", _) => Self::Help,
            ("list", "") => Self::List,
            ("clear", "") => Self::Clear,
            ("new", "") => Self::New(None),
            ("new", role) => parse_role(role).map_or_else(Self::Invalid, |r| Self::New(Some(r))),
            ("role", "") => Self::Invalid("Usage: /role <support|teacher|assistant>".to_string()),
            ("role", role) => parse_role(role).map_or_else(Self::Invalid, Self::Role),
            ("switch", "") => Self::Invalid("Usage: /switch <session id>".to_string()),
            ("switch", id) => Self::Switch(id.to_string()),
            ("delete", "") => Self::Invalid("Usage: /delete <session id>".to_string()),
            ("delete", id) => Self::Delete(id.to_string()),
            _ => Self::Invalid(format!("Unknown command '/{}'. Type /help for the list.", name)),
        }
    }
}

fn parse_role(name: &str) -> Result<ChatRole, String> {
    name.parse::<ChatRole>().map_err(|e| e.to_string())
}

fn print_help() {
    println!("{} Chat commands:", "💡".bright_yellow());
    println!("  /new [role]        - Start a new session (support, teacher, assistant)");
    println!("  /role <role>       - Role for the next session started by a message");
    println!("  /list              - List sessions (* marks the active one)");
    println!("  /switch <id>       - Continue an existing session");
    println!("  /delete <id>       - Delete a session");
    println!("  /clear             - Delete all sessions");
    println!("  /help              - Show this help");
    println!("  exit, quit         - Leave the chat");
}

fn print_roles() {
    for role in ChatRole::ALL {
        println!(
            "  {:<10} {} - {}",
            role.as_str().bright_white(),
            role.title().bold(),
            role.description().bright_black()
        );
    }
}

fn print_reply(role: ChatRole, reply: &Message, fallback: bool) {
    let speaker = format!("{}:", role.title()).bright_cyan().bold();
    let stamp = local_time(&reply.timestamp).bright_black();
    if fallback {
        println!("{} {} {}", stamp, speaker, reply.content.bright_red());
    } else {
        println!("{} {} {}", stamp, speaker, reply.content);
    }
}

fn prompt(store: &ChatStore) -> String {
    let indicator = match store.active_session() {
        Some(session) => format!("[{}]", session.title),
        None => format!("[new {} chat]", store.default_role()),
    };
    format!("{} {} ", indicator.bright_magenta(), "You:".bright_green().bold())
}

async fn send(store: &ChatStore, text: &str) {
    println!("{}", "…".bright_black());
    match store.send_message(text).await {
        Ok(SendOutcome::Replied { session_id, reply, fallback }) => {
            let role = store.session(&session_id).map(|s| s.role).unwrap_or_default();
            print_reply(role, &reply, fallback);
        }
        Ok(SendOutcome::Ignored(IgnoredReason::Busy)) => {
            println!("{} Still waiting for the previous reply", "⏳".bright_yellow());
        }
        Ok(SendOutcome::Ignored(IgnoredReason::EmptyInput)) => {}
        Ok(SendOutcome::Discarded { session_id }) => {
            println!("{} Session {} was deleted before its reply arrived", "⚠️".yellow(), session_id);
        }
        Err(e) => eprintln!("{} Failed to save sessions: {}", "❌".bright_red(), e),
    }
}

/// Apply one REPL command. Returns false when the user asked to leave.
async fn handle(store: &ChatStore, command: ReplCommand) -> bool {
    match command {
        ReplCommand::Exit => return false,
        ReplCommand::Help => print_help(),
        ReplCommand::New(role) => {
            let role = role.unwrap_or_else(|| store.default_role());
            match store.create_session(role) {
                Ok(id) => println!("{} Started {} ({})", "✨".bright_green(), role.session_title().bold(), id.bright_black()),
                Err(e) => eprintln!("{} Failed to create session: {}", "❌".bright_red(), e),
            }
        }
        ReplCommand::Role(role) => {
            store.set_default_role(role);
            println!("{} Next new session will use {}", "🎭".bright_cyan(), role.title().bold());
        }
        ReplCommand::List => {
            let active = store.active_session_id();
            println!("{}", render_session_list(&store.sessions(), active.as_deref()));
        }
        ReplCommand::Switch(id) => {
            if store.select_session(&id) {
                if let Some(session) = store.active_session() {
                    println!("{}", render_transcript(&session));
                }
            } else {
                eprintln!("{} No session with id {}", "❌".bright_red(), id);
            }
        }
        ReplCommand::Delete(id) => match store.delete_session(&id) {
            Ok(true) => println!("{} Deleted session {}", "🗑️".bright_green(), id),
            Ok(false) => eprintln!("{} No session with id {}", "❌".bright_red(), id),
            Err(e) => eprintln!("{} Failed to delete session: {}", "❌".bright_red(), e),
        },
        ReplCommand::Clear => match store.delete_all_sessions() {
            Ok(()) => println!("{} All sessions deleted", "🗑️".bright_green()),
            Err(e) => eprintln!("{} Failed to delete sessions: {}", "❌".bright_red(), e),
        },
        ReplCommand::Send(text) => send(store, &text).await,
        ReplCommand::Invalid(message) => eprintln!("{} {}", "❌".bright_red(), message),
    }
    true
}

/// Run interactive chat mode
pub async fn run_repl_mode(args: &ChatArgs, verbose: bool) -> Result<()> {
    let store: Arc<ChatStore> = open_chat_store(args, verbose)?;

    println!("{}", "🤖 rolechat".bright_cyan().bold());
    if args.direct {
        println!("{}", format!("Model: {} via {}", args.llm.model, args.llm.backend).bright_black());
    } else {
        println!("{}", format!("Server: {}", args.endpoint).bright_black());
    }
    println!("{}", format!("{} stored sessions", store.sessions().len()).bright_black());
    print_roles();
    println!("{}", "Type a message to chat, /help for commands, 'exit' to quit\n".bright_black());

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(&prompt(&store)) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                if !handle(&store, ReplCommand::parse(line)).await {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}
