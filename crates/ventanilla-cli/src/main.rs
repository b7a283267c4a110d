//! ventanilla - CLI client for the employee self-service portal.
//!
//! This is a thin wrapper over the `ventanilla-core` library: log in,
//! check the payroll and lodging services, and look up taxpayer
//! registrations from the command line.

mod cli;
mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Login(args) => commands::login::run(args, cli.base_url).await,
        Commands::Logout(args) => commands::logout::run(args, cli.base_url).await,
        Commands::Status(args) => commands::status::run(args, cli.base_url).await,
        Commands::Payroll(args) => commands::payroll::run(args, cli.base_url).await,
        Commands::Lodging(args) => commands::lodging::run(args, cli.base_url).await,
        Commands::Rfc(args) => commands::rfc::run(args, cli.base_url).await,
    };

    // One legible line per failure; the full chain stays on one line
    // via anyhow's alternate format
    if let Err(e) = result {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG still wins when set, so scripts can scope filtering to
    // individual modules
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
