use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Order Origin Filter
#[derive(Parser)]
#[command(name = "origin-filter")]
#[command(about = "Filter shop orders by origin, payment gateway and month, and total the sales")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Load orders from a CSV export into the order store
    Import(commands::import::ImportCommand),
    /// List the distinct values offered in each filter dropdown
    Values(commands::values::ValuesCommand),
    /// Total the counted orders matching a filter
    Summary(commands::summary::SummaryCommand),
    /// List every order matching a filter, any status
    Orders(commands::orders::OrdersCommand),
}

pub fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import(command) => command.run(),
        Commands::Values(command) => command.run(),
        Commands::Summary(command) => command.run(),
        Commands::Orders(command) => command.run(),
    }
}
