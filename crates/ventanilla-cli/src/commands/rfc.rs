//! Taxpayer lookup command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::commands;
use crate::output;

#[derive(Args, Debug)]
pub struct RfcArgs {
    /// RFC to look up (trimmed and uppercased before dispatch)
    pub rfc: String,

    /// Print the raw records as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RfcArgs, base_url: Option<String>) -> Result<()> {
    let portal = commands::connect(base_url)?;

    let records = portal
        .client
        .lookup_rfc(&args.rfc)
        .await
        .context("Failed to look up RFC")?;

    if args.json {
        return output::json_pretty(&records);
    }

    if records.is_empty() {
        eprintln!("{}", "No registrations found.".dimmed());
        return Ok(());
    }

    output::success(&format!("{} registration(s) found", records.len()));
    for record in &records {
        println!();
        output::field("RFC", &record.rfc);
        output::field("Name", &record.name);
        if let Some(trade_name) = &record.trade_name {
            output::field("Trade name", trade_name);
        }
        output::field("System", &record.system);
        output::field("Branch", &record.branch_type);
        let status = if record.is_active() {
            record.status.green().to_string()
        } else {
            record.status.red().to_string()
        };
        output::field("Status", &status);
    }

    Ok(())
}
