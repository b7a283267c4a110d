//! Lodging availability command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands;

#[derive(Args, Debug)]
pub struct LodgingArgs {
    /// Print the raw report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: LodgingArgs, base_url: Option<String>) -> Result<()> {
    let portal = commands::connect(base_url)?;

    let report = portal
        .client
        .fetch_lodging()
        .await
        .context("Failed to query lodging availability")?;

    commands::finish_report(&report, args.json)
}
