use std::process::ExitCode;

use clap::Parser;
use money_mind::cli::{
    Cli, CommandOutcome, execute_command, init_logger_from_settings, load_and_merge_config,
};
use money_mind::server::Server;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is not up yet, so configuration problems go to stderr.
    let settings = match load_and_merge_config(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_handle = match init_logger_from_settings(&settings) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logger: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match execute_command(&cli, settings.clone()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = ?e, "Command failed");
            return ExitCode::FAILURE;
        }
    };

    if outcome == CommandOutcome::StartServer {
        if let Err(e) = Server::new(settings).run().await {
            tracing::error!(error = ?e, "Server error");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
