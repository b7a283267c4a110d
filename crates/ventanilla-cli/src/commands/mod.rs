//! Subcommand implementations.

pub mod lodging;
pub mod login;
pub mod logout;
pub mod payroll;
pub mod rfc;
pub mod status;

use std::process;
use std::sync::Arc;

use anyhow::Result;

use ventanilla_core::{ApiClient, AuthClient, Config, ExecutionReport, PlatformTokenStore};

use crate::output;

/// Everything a subcommand needs: the portal client and the loaded
/// config (for the remembered username and for saving changes back).
pub struct Portal {
    pub client: ApiClient,
    pub config: Config,
}

/// Build the portal client shared by every subcommand. The base URL
/// resolves flag > `VENTANILLA_BASE_URL` > config file > default; the
/// token store is the platform keychain with a file fallback.
pub fn connect(base_url_flag: Option<String>) -> Result<Portal> {
    let config = Config::load()?;
    let base_url = base_url_flag.unwrap_or_else(|| config.resolved_base_url());

    let mut auth = AuthClient::new(base_url, Arc::new(PlatformTokenStore::new()));
    auth.set_timeout(config.request_timeout());

    Ok(Portal {
        client: ApiClient::new(auth),
        config,
    })
}

/// Print an execution report and surface an in-band failure through the
/// exit status, so `ventanilla payroll && ...` behaves.
pub(crate) fn finish_report(report: &ExecutionReport, json: bool) -> Result<()> {
    if json {
        output::json_pretty(report)?;
    } else if report.is_success() {
        output::success(report.display_message());
    } else {
        output::error(report.display_message());
    }

    if !report.is_success() {
        process::exit(1);
    }
    Ok(())
}
