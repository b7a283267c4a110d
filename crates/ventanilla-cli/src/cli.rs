//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{lodging, login, logout, payroll, rfc, status};

/// Command-line client for the employee self-service portal.
#[derive(Parser, Debug)]
#[command(name = "ventanilla")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Portal base URL (overrides VENTANILLA_BASE_URL and the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session token
    Login(login::LoginArgs),

    /// Clear the stored session token
    Logout(logout::LogoutArgs),

    /// Show the portal target and whether a session token is stored
    Status(status::StatusArgs),

    /// Check payroll receipt availability
    Payroll(payroll::PayrollArgs),

    /// Check lodging service availability
    Lodging(lodging::LodgingArgs),

    /// Look up taxpayer registrations by RFC
    Rfc(rfc::RfcArgs),
}
