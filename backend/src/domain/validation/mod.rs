//! Validation chains for service operations.
//!
//! Purpose: collect the rules guarding one business operation, run them with
//! short-circuit semantics and turn the outcome into a [`ValidationResult`]
//! or a typed [`ServiceResult`](crate::domain::ServiceResult).
//!
//! Execution contract:
//! - Synchronous rules run as they are registered.
//! - Deferred rules run only at a terminal call, one at a time, in
//!   registration order, and never once a synchronous rule has failed.
//! - The success continuation starts only after every deferred rule has
//!   resolved.
//! - The first structured error decides the failure code; plain messages
//!   are folded into its message, plain messages first.

mod async_sugar;
mod builder;
mod error;
mod outcome;
mod rules;
mod state;
mod sugar;

pub use self::builder::{BuilderState, ServiceValidate, ValidationBuilder};
pub use self::error::ValidationError;
pub use self::outcome::ValidationResult;
pub use self::state::ValidationState;
