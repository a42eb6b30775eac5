//! Service-layer primitives: errors, results, identifiers and validation.
//!
//! Purpose: give every service operation one way to check its inputs and
//! one envelope to report the outcome in. Types here are transport agnostic;
//! inbound adapters decide how failures are rendered.
//!
//! Public surface:
//! - ServiceError / ServiceErrorCode: structured failure with a stable code.
//! - ServiceResult: success/failure envelope carrying a payload.
//! - SpecializedId / IdKind / Empty: prefixed identifiers and the empty
//!   sentinel used by failed results.
//! - ServiceValidate / ValidationBuilder: fluent validation chains.

pub mod service_error;
pub mod service_result;
pub mod specialized_id;
pub mod validation;

pub use self::service_error::{ServiceError, ServiceErrorCode};
pub use self::service_result::ServiceResult;
pub use self::specialized_id::{Empty, IdKind, SpecializedId, SpecializedIdError};
pub use self::validation::{
    BuilderState, ServiceValidate, ValidationBuilder, ValidationError, ValidationResult,
    ValidationState,
};
