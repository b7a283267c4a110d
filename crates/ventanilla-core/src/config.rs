//! Application configuration management.
//!
//! This module handles loading and saving the application
//! configuration: the portal origin, the request timeout, and the last
//! used username.
//!
//! Configuration is stored at `~/.config/ventanilla/config.json`. The
//! portal origin resolves environment override first, then the config
//! file, then the built-in default.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "ventanilla";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default portal origin. This is the counterparty's development
/// origin; deployments override it via flag, environment, or config.
pub const DEFAULT_BASE_URL: &str = "http://localhost:44306";

/// Environment variable overriding the portal origin
pub const BASE_URL_ENV: &str = "VENTANILLA_BASE_URL";

/// Default request timeout in seconds.
/// 60s matches the allowance the portal's own front-end grants its
/// slower report endpoints.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolve the portal origin: `VENTANILLA_BASE_URL` first, then the
    /// config file, then the built-in default.
    pub fn resolved_base_url(&self) -> String {
        self.base_url_with(std::env::var(BASE_URL_ENV).ok())
    }

    fn base_url_with(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|v| !v.is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Request timeout as configured, or the 60-second default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
