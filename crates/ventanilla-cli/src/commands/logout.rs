//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::commands;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, base_url: Option<String>) -> Result<()> {
    let portal = commands::connect(base_url)?;

    // Local only: the portal has no server-side invalidation call
    portal.client.auth().logout();
    output::success("Session token cleared");

    Ok(())
}
