//! Status command implementation.

use std::process;

use anyhow::Result;
use clap::Args;

use crate::commands;
use crate::output;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub async fn run(_args: StatusArgs, base_url: Option<String>) -> Result<()> {
    let portal = commands::connect(base_url)?;

    output::field("Portal", portal.client.base_url());
    if let Some(username) = &portal.config.last_username {
        output::field("User", username);
    }

    // No server round-trip: this only reports whether a token is stored
    if portal.client.auth().is_authenticated() {
        output::success("A session token is stored");
    } else {
        output::error("No session token stored. Run 'ventanilla login' first.");
        process::exit(1);
    }

    Ok(())
}
