use anyhow::Result;
use colored::Colorize;

use crate::cli::ServeArgs;
use crate::config::{create_llm_client, parse_bind_addr};
use crate::web::server::{WebServer, WebServerConfig};

/// Run the completion server
pub async fn run_web_server(args: &ServeArgs, verbose: bool) -> Result<()> {
    let addr = parse_bind_addr(&args.bind, args.port)?;
    let client = create_llm_client(&args.llm, args.timeout, verbose)?;

    println!("{}", "🤖 Starting rolechat completion server...".bright_cyan().bold());
    println!("   Backend: {} ({})", args.llm.backend, args.llm.model);

    let config = WebServerConfig {
        bind_addr: addr,
        model: args.llm.model.clone(),
    };

    WebServer::new(config, client).start().await
}
