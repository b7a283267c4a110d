//! Wire-facing data models for the portal API.
//!
//! Field names on the wire are Spanish and case-sensitive — that casing
//! is part of the external contract, so every struct here maps it with
//! `#[serde(rename)]` rather than altering it.
//!
//! - `LoginRequest`, `LoginResponse`: the login exchange
//! - `ExecutionReport`: the payroll/lodging response shape
//! - `TaxpayerRecord`: one row of an RFC lookup result

pub mod login;
pub mod report;
pub mod taxpayer;

pub use login::{LoginRequest, LoginResponse};
pub use report::ExecutionReport;
pub use taxpayer::{normalize_rfc, TaxpayerRecord};
