use anyhow::Result;
use clap::{CommandFactory, Parser};

use rolechat::{run_repl_mode, run_sessions_command, run_web_server, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    rolechat_logging::init_logger(cli.verbose);

    match &cli.command {
        Commands::Serve(args) => run_web_server(args, cli.verbose).await,
        Commands::Chat(args) => run_repl_mode(args, cli.verbose).await,
        Commands::Sessions { command, state_file } => {
            let result = run_sessions_command(command, state_file.clone())?;
            println!("{}", result);
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "rolechat", &mut std::io::stdout());
            Ok(())
        }
    }
}
