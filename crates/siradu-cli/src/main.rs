//! siradu - Terminal front end for the Siradu admin API.
//!
//! This is a thin wrapper over the `siradu-client` library, intended
//! for operators who prefer a shell to the web console: the same
//! credential flow, resource screens, and history viewers, minus the
//! rendering.

mod cli;
mod commands;
mod models;
mod notify;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Whoami => commands::whoami::run(&cli.connection).await,
        Commands::Nurse(cmd) => commands::nurse::handle(&cli.connection, cmd).await,
        Commands::Patient(cmd) => commands::patient::handle(&cli.connection, cmd).await,
        Commands::History(cmd) => commands::history::handle(&cli.connection, cmd).await,
        Commands::Audit(cmd) => commands::audit::handle(&cli.connection, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
