//! Authentication: the login exchange and session-token persistence.
//!
//! This module provides:
//! - `AuthClient`: the login protocol, auth-header construction, and
//!   session checks
//! - `TokenStore`: pluggable persistence for the single session token,
//!   with keychain, file, in-memory, and platform-composite backends
//!
//! The platform store prefers the OS keychain and falls back to a file
//! under the user data directory. Storage failures are logged and
//! absorbed: an absent token simply reads as "not authenticated".

pub mod client;
pub mod store;

pub use client::{AuthClient, SessionData};
pub use store::{FileStore, KeyringStore, MemoryTokenStore, PlatformTokenStore, TokenStore};
