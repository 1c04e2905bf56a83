//! geocoin - location-based coin collecting
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use geocoin::cli::commands;
use geocoin::cli::{Cli, Commands};
use geocoin::config::{Config, ConfigManager};
use geocoin::error::{GeocoinError, GeocoinResult};
use geocoin::transfer::TransferDirection;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> GeocoinResult<()> {
    let cli = Cli::parse();

    // Completions need neither config nor state
    if let Commands::Completions { shell } = cli.command {
        return commands::completions(shell).await;
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = match config_manager.load().await {
        // `config init --force` must still be able to repair a broken file
        Err(GeocoinError::ConfigInvalid { .. }) if matches!(cli.command, Commands::Config(_)) => {
            Config::default()
        }
        loaded => loaded?,
    };

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    let state_dir = cli.state_dir.unwrap_or_else(ConfigManager::state_dir);
    ConfigManager::ensure_state_dir(&state_dir).await?;
    debug!("Using state directory {}", state_dir.display());

    match cli.command {
        Commands::Completions { .. } => unreachable!("Completions handled above"),
        Commands::Status => commands::status(&config, &state_dir).await,
        Commands::Move(args) => commands::walk(args, &config, &state_dir).await,
        Commands::Goto { lat, lng } => commands::goto(lat, lng, &config, &state_dir).await,
        Commands::Caches { format } => commands::caches(format, &config, &state_dir).await,
        Commands::Inventory { format } => commands::inventory(format, &config, &state_dir).await,
        Commands::Collect(args) => {
            commands::transfer(args, TransferDirection::Collect, &config, &state_dir).await
        }
        Commands::Deposit(args) => {
            commands::transfer(args, TransferDirection::Deposit, &config, &state_dir).await
        }
        Commands::Map => commands::map(&config, &state_dir).await,
        Commands::History { format, limit } => {
            commands::history(format, limit, &config, &state_dir).await
        }
        Commands::Reset { yes } => commands::reset(yes, &config, &state_dir).await,
        Commands::Config(args) => commands::config(args, &config_manager, &config).await,
    }
}

/// Install the tracing subscriber: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("geocoin=warn"),
        1 => EnvFilter::new("geocoin=info"),
        _ => EnvFilter::new("geocoin=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
