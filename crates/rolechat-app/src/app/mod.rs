pub mod repl;
pub mod sessions;
pub mod setup;
pub mod web_server;

pub use repl::run_repl_mode;
pub use sessions::run_sessions_command;
pub use setup::{open_chat_store, open_session_store};
pub use web_server::run_web_server;
