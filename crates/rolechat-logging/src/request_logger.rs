use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{get_logs_dir, mask_api_key, safe_truncate};

const CONSOLE_BODY_LIMIT: usize = 5000;

fn describe_url(url: &str) -> String {
    let mut out = String::new();
    match reqwest::Url::parse(url) {
        Ok(parsed_url) => {
            let port = parsed_url.port().map(|p| p.to_string()).unwrap_or_else(|| {
                if parsed_url.scheme() == "https" {
                    "443 (default)".to_string()
                } else {
                    "80 (default)".to_string()
                }
            });
            let _ = writeln!(out, "URL: {}", url);
            let _ = writeln!(out, "Host: {}", parsed_url.host_str().unwrap_or("unknown"));
            let _ = writeln!(out, "Port: {}", port);
            let _ = writeln!(out, "Scheme: {}", parsed_url.scheme());
        }
        Err(_) => {
            let _ = writeln!(out, "URL: {}", url);
        }
    }
    out
}

fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}

fn file_safe(model: &str) -> String {
    model.replace(['/', ':'], "-")
}

/// Log HTTP request details for debugging (stderr)
pub fn log_request(url: &str, request: &serde_json::Value, api_key: &str, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("\n{}", "═".repeat(80).bright_cyan());
    eprintln!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    eprintln!("{}", "═".repeat(80).bright_cyan());
    eprint!("{}", describe_url(url));

    eprintln!("\n{}", "Headers:".bright_yellow());
    eprintln!("  Content-Type: application/json");
    eprintln!("  Authorization: Bearer {}", mask_api_key(api_key));

    eprintln!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(request) {
        Ok(json) if json.chars().count() > CONSOLE_BODY_LIMIT => {
            eprintln!("{}", safe_truncate(&json, CONSOLE_BODY_LIMIT));
            eprintln!("\n{}", format!("... (truncated, total {} bytes)", json.len()).bright_black());
        }
        Ok(json) => eprintln!("{}", json),
        Err(e) => eprintln!("{}", format!("Error serializing request: {}", e).red()),
    }

    eprintln!("{}", "═".repeat(80).bright_cyan());
}

/// Log HTTP response details for debugging (stderr)
pub fn log_response(status: reqwest::StatusCode, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("\n{}", "═".repeat(80).bright_green());
    eprintln!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    eprintln!("{}", "═".repeat(80).bright_green());
    eprintln!(
        "{}: {} {}",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    eprintln!("\n{}", "Response Body:".bright_yellow());
    let pretty = pretty_body(body);
    if pretty.chars().count() > CONSOLE_BODY_LIMIT {
        eprintln!("{}", safe_truncate(&pretty, CONSOLE_BODY_LIMIT));
        eprintln!("\n{}", format!("... (truncated, total {} bytes)", pretty.len()).bright_black());
    } else {
        eprintln!("{}", pretty);
    }

    eprintln!("{}", "═".repeat(80).bright_green());
}

/// Write a request log file into `logs_dir`, returning its path.
/// The file is named `req-<timestamp>-<model>.txt`.
pub fn log_request_to_dir(
    logs_dir: &Path,
    url: &str,
    request: &serde_json::Value,
    model: &str,
    api_key: &str,
    timestamp: i64,
) -> Result<PathBuf> {
    let file_path = logs_dir.join(format!("req-{}-{}.txt", timestamp, file_safe(model)));

    let mut log_content = String::new();
    log_content.push_str("HTTP REQUEST LOG\n");
    log_content.push_str("================\n\n");
    let _ = writeln!(log_content, "Timestamp: {}", timestamp);
    let _ = writeln!(log_content, "Model: {}\n", model);
    log_content.push_str(&describe_url(url));

    log_content.push_str("\nHeaders:\n");
    log_content.push_str("  Content-Type: application/json\n");
    let _ = writeln!(log_content, "  Authorization: Bearer {}\n", mask_api_key(api_key));

    log_content.push_str("Request Body:\n");
    match serde_json::to_string_pretty(request) {
        Ok(json) => {
            log_content.push_str(&json);
            log_content.push('\n');
        }
        Err(e) => {
            let _ = writeln!(log_content, "Error serializing request: {}", e);
        }
    }

    fs::write(&file_path, log_content)
        .with_context(|| format!("Failed to write request log to {}", file_path.display()))?;

    log::debug!("Request logged to: {}", file_path.display());
    Ok(file_path)
}

/// Write a response log file into `logs_dir` next to its request log
pub fn log_response_to_dir(
    logs_dir: &Path,
    status: reqwest::StatusCode,
    body: &str,
    model: &str,
    request_timestamp: i64,
) -> Result<PathBuf> {
    let file_path = logs_dir.join(format!("resp-{}-{}.txt", request_timestamp, file_safe(model)));

    let mut log_content = String::new();
    log_content.push_str("HTTP RESPONSE LOG\n");
    log_content.push_str("=================\n\n");
    let _ = writeln!(log_content, "Timestamp: {}", request_timestamp);
    let _ = writeln!(log_content, "Model: {}\n", model);
    let _ = writeln!(
        log_content,
        "Status: {} {}\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    log_content.push_str("Response Body:\n");
    log_content.push_str(&pretty_body(body));
    log_content.push('\n');

    let _ = write!(log_content, "\n---\nResponse Size: {} bytes\n", body.len());

    fs::write(&file_path, log_content)
        .with_context(|| format!("Failed to write response log to {}", file_path.display()))?;

    log::debug!("Response logged to: {}", file_path.display());
    Ok(file_path)
}

/// Log HTTP request to ~/.rolechat/logs for persistent debugging
pub fn log_request_to_file(
    url: &str,
    request: &serde_json::Value,
    model: &str,
    api_key: &str,
    timestamp: i64,
) -> Result<PathBuf> {
    log_request_to_dir(&get_logs_dir()?, url, request, model, api_key, timestamp)
}

/// Log HTTP response to ~/.rolechat/logs for persistent debugging
pub fn log_response_to_file(
    status: reqwest::StatusCode,
    body: &str,
    model: &str,
    request_timestamp: i64,
) -> Result<PathBuf> {
    log_response_to_dir(&get_logs_dir()?, status, body, model, request_timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_log_masks_key_and_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_request_to_dir(
            dir.path(),
            "https://api.groq.com/openai/v1/chat/completions",
            &json!({ "model": "llama-3.3-70b-versatile", "messages": [] }),
            "meta/llama:70b",
            "gsk_secretsecretsecret",
            1700000000,
        )
        .unwrap();

        assert_eq!(path.file_name().unwrap(), "req-1700000000-meta-llama-70b.txt");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Host: api.groq.com"));
        assert!(content.contains("Port: 443 (default)"));
        assert!(content.contains("Bearer gsk_secret***"));
        assert!(!content.contains("gsk_secretsecretsecret"));
    }

    #[test]
    fn test_response_log_pretty_prints_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_response_to_dir(
            dir.path(),
            reqwest::StatusCode::OK,
            r#"{"choices":[]}"#,
            "model",
            42,
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Status: 200 OK"));
        assert!(content.contains("\"choices\": []"));
        assert!(content.contains("Response Size: 14 bytes"));
    }

    #[test]
    fn test_response_log_keeps_non_json_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_response_to_dir(
            dir.path(),
            reqwest::StatusCode::BAD_GATEWAY,
            "upstream unavailable",
            "model",
            7,
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Status: 502 Bad Gateway"));
        assert!(content.contains("upstream unavailable"));
    }
}
