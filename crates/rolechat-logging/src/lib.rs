// Logging module - logger setup and request/response debug logging
pub mod request_logger;

use anyhow::{Context, Result};
use std::path::PathBuf;

// Re-export request logging functions
pub use request_logger::{
    log_request,
    log_request_to_dir,
    log_request_to_file,
    log_response,
    log_response_to_dir,
    log_response_to_file,
};

/// Initialise the global `log` backend.
///
/// `RUST_LOG` wins when set; otherwise rolechat crates log at `info`, or at
/// `debug` when `verbose` is true, and everything else at `warn`.
pub fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!(
        "warn,rolechat={level},rolechat_chat={level},rolechat_llm_api={level},rolechat_logging={level}"
    );

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Show only the first characters of an API key
pub fn mask_api_key(api_key: &str) -> String {
    format!("{}***", api_key.chars().take(10).collect::<String>())
}

/// Get or create the base rolechat directory (~/.rolechat)
/// Shared between logs and the default session state file
pub fn get_rolechat_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let rolechat_dir = PathBuf::from(home_dir).join(".rolechat");

    if !rolechat_dir.exists() {
        std::fs::create_dir_all(&rolechat_dir)
            .context("Failed to create rolechat directory")?;
    }

    Ok(rolechat_dir)
}

/// Get or create the logs directory (~/.rolechat/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_rolechat_dir()?.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir)
            .context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}
