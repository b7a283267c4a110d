//! Client library for a government employee self-service portal:
//! login, session-token persistence, and the payroll, lodging, and
//! taxpayer-lookup (RFC) services.
//!
//! The wire contract is Spanish-named and case-sensitive; this crate
//! preserves it exactly on the wire while exposing an English API. All
//! failures surface as one [`Error`] taxonomy — timeouts, invalid
//! credentials, server errors, and parse failures are always
//! distinguishable, and nothing is retried automatically.
//!
//! ```no_run
//! use std::sync::Arc;
//! use ventanilla_core::{ApiClient, AuthClient, PlatformTokenStore};
//!
//! # async fn run() -> ventanilla_core::Result<()> {
//! let store = Arc::new(PlatformTokenStore::new());
//! let auth = AuthClient::new("https://portal.example.gob.mx", store);
//! let client = ApiClient::new(auth);
//!
//! let session = client.auth().login("EMP0421", "hunter2").await?;
//! println!("welcome: {}", session.message.as_deref().unwrap_or("-"));
//!
//! let payroll = client.fetch_payroll().await?;
//! println!("{}", payroll.display_message());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;

pub use api::{ApiClient, RequestOptions};
pub use auth::{
    AuthClient, FileStore, KeyringStore, MemoryTokenStore, PlatformTokenStore, SessionData,
    TokenStore,
};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{normalize_rfc, ExecutionReport, TaxpayerRecord};
