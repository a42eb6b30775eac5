//! Error payload attached to a validation rule.

use crate::domain::ServiceError;

/// What a failing rule reports: a plain message or a structured error.
///
/// `&str` and `String` convert into [`ValidationError::Message`], a
/// [`ServiceError`] into [`ValidationError::Structured`], so rule methods
/// accept either form.
///
/// ```
/// use service_validation::domain::{ServiceError, ValidationError};
///
/// let plain: ValidationError = "Name is required".into();
/// assert!(matches!(plain, ValidationError::Message(_)));
///
/// let structured: ValidationError = ServiceError::not_found("Exercise").into();
/// assert_eq!(structured.message(), "Exercise not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Free-form message; surfaces with the `ValidationFailed` code.
    Message(String),
    /// Structured error whose code is preserved.
    Structured(ServiceError),
}

impl ValidationError {
    /// Human-readable text of the error.
    pub fn message(&self) -> &str {
        match self {
            Self::Message(message) => message.as_str(),
            Self::Structured(error) => error.message(),
        }
    }
}

impl From<&str> for ValidationError {
    fn from(value: &str) -> Self {
        Self::Message(value.to_owned())
    }
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<ServiceError> for ValidationError {
    fn from(value: ServiceError) -> Self {
        Self::Structured(value)
    }
}
