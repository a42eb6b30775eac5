//! Service-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorCode {
    /// Client input is malformed or violates a business rule.
    ValidationFailed,
    /// A referenced entity does not exist.
    NotFound,
    /// A uniqueness constraint would be violated.
    AlreadyExists,
    /// An identifier or value does not match its expected format.
    InvalidFormat,
    /// An unexpected error occurred inside the service.
    InternalError,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    InsufficientPermissions,
    /// The entity was modified concurrently.
    ConcurrencyConflict,
    /// Other entities still depend on the entity being changed.
    DependencyExists,
    /// A collaborating service or store failed.
    DependencyFailure,
}

/// Structured service failure: a code plus a human-readable message.
///
/// # Examples
/// ```
/// use service_validation::domain::{ServiceError, ServiceErrorCode};
///
/// let err = ServiceError::not_found("Exercise");
/// assert_eq!(err.code(), ServiceErrorCode::NotFound);
/// assert_eq!(err.message(), "Exercise not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ServiceError {
    code: ServiceErrorCode,
    message: String,
}

impl ServiceError {
    /// Create an error with an explicit code and message.
    pub fn new(code: ServiceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ServiceErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Return a copy of this error with the same code and a new message.
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self::new(self.code, message)
    }

    /// The named entity could not be found.
    pub fn not_found(entity: impl AsRef<str>) -> Self {
        Self::new(
            ServiceErrorCode::NotFound,
            format!("{} not found", entity.as_ref()),
        )
    }

    /// An entity with the given value already exists.
    ///
    /// ```
    /// use service_validation::domain::ServiceError;
    ///
    /// let err = ServiceError::already_exists("User", "a@b.com");
    /// assert_eq!(err.message(), "User with value 'a@b.com' already exists");
    /// ```
    pub fn already_exists(entity: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Self::new(
            ServiceErrorCode::AlreadyExists,
            format!(
                "{} with value '{}' already exists",
                entity.as_ref(),
                value.as_ref()
            ),
        )
    }

    /// Convenience constructor for [`ServiceErrorCode::ValidationFailed`].
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::ValidationFailed, message)
    }

    /// A field did not match its expected format.
    pub fn invalid_format(field: impl AsRef<str>, expected_format: impl AsRef<str>) -> Self {
        Self::new(
            ServiceErrorCode::InvalidFormat,
            format!(
                "Invalid {} format. Expected format: {}",
                field.as_ref(),
                expected_format.as_ref()
            ),
        )
    }

    /// Convenience constructor for [`ServiceErrorCode::InternalError`].
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::InternalError, message)
    }

    /// Convenience constructor for [`ServiceErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ServiceErrorCode::InsufficientPermissions`].
    pub fn insufficient_permissions(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::InsufficientPermissions, message)
    }

    /// The named entity was changed by another operation.
    pub fn concurrency_conflict(entity: impl AsRef<str>) -> Self {
        Self::new(
            ServiceErrorCode::ConcurrencyConflict,
            format!("{} was modified by another operation", entity.as_ref()),
        )
    }

    /// The entity cannot change because `dependent` still references it.
    pub fn dependency_exists(entity: impl AsRef<str>, dependent: impl AsRef<str>) -> Self {
        Self::new(
            ServiceErrorCode::DependencyExists,
            format!(
                "{} is still referenced by {}",
                entity.as_ref(),
                dependent.as_ref()
            ),
        )
    }

    /// Convenience constructor for [`ServiceErrorCode::DependencyFailure`].
    pub fn dependency_failure(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorCode::DependencyFailure, message)
    }
}
