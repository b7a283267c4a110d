//! Login command implementation.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::warn;

use crate::commands;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Portal username (defaults to the last one used)
    #[arg(long)]
    pub username: Option<String>,

    /// Portal password (prompted for when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn run(args: LoginArgs, base_url: Option<String>) -> Result<()> {
    let mut portal = commands::connect(base_url)?;

    let username = match args.username.or_else(|| portal.config.last_username.clone()) {
        Some(u) => u,
        None => bail!("No username given. Pass --username (it is remembered afterwards)."),
    };

    let password = match args.password {
        Some(p) => p,
        None => rpassword::prompt_password(format!("Password for {}: ", username))
            .context("Failed to read password")?,
    };

    eprintln!("{}", "Logging in...".dimmed());

    let session = portal
        .client
        .auth()
        .login(&username, &password)
        .await
        .context("Login failed")?;

    portal.config.last_username = Some(username.clone());
    if let Err(e) = portal.config.save() {
        warn!(error = %e, "Could not save config");
    }

    output::success("Logged in successfully");
    println!();
    output::field("User", &username);
    output::field("Portal", portal.client.base_url());
    if let Some(message) = &session.message {
        output::field("Message", message);
    }

    Ok(())
}
