//! HTTP inbound adapter rendering service outcomes for Actix handlers.

pub mod error;

pub use error::{FailureBody, status_for};
