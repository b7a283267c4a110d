//! REST client for the employee-portal services.
//!
//! This module provides the `ApiClient` for calling the portal's
//! payroll, lodging, and taxpayer-lookup endpoints with the bearer
//! token obtained through the auth module.

pub mod client;

pub use client::{ApiClient, RequestOptions};
