//! Payroll availability command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands;

#[derive(Args, Debug)]
pub struct PayrollArgs {
    /// Print the raw report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: PayrollArgs, base_url: Option<String>) -> Result<()> {
    let portal = commands::connect(base_url)?;

    let report = portal
        .client
        .fetch_payroll()
        .await
        .context("Failed to query payroll availability")?;

    commands::finish_report(&report, args.json)
}
