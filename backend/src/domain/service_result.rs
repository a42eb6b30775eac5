//! Terminal success/failure envelope returned by service operations.

use serde::Serialize;

use super::service_error::{ServiceError, ServiceErrorCode};
use crate::settings::{DEFAULT_MESSAGE_SEPARATOR, ValidationSettings};

/// Outcome of a service operation returning `T`.
///
/// A failure still carries a `T`: callers pass the type's empty sentinel
/// (see [`Empty`](super::Empty)) so adapters never deal with a missing
/// payload.
///
/// # Examples
/// ```
/// use service_validation::domain::{ServiceError, ServiceErrorCode, ServiceResult};
///
/// let ok = ServiceResult::success(42);
/// assert!(ok.is_success());
///
/// let failed = ServiceResult::failure_with_error(0, ServiceError::not_found("Exercise"));
/// assert_eq!(failed.primary_error_code(), Some(ServiceErrorCode::NotFound));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult<T> {
    data: T,
    is_success: bool,
    errors: Vec<String>,
    structured_errors: Vec<ServiceError>,
}

impl<T> ServiceResult<T> {
    /// Successful outcome carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            data,
            is_success: true,
            errors: Vec::new(),
            structured_errors: Vec::new(),
        }
    }

    /// Failure described by plain string errors.
    pub fn failure<I, S>(empty: T, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: empty,
            is_success: false,
            errors: errors.into_iter().map(Into::into).collect(),
            structured_errors: Vec::new(),
        }
    }

    /// Failure described by structured errors.
    ///
    /// The string error list mirrors the structured messages so consumers
    /// that only read strings still see every failure.
    pub fn failure_with_errors<I>(empty: T, errors: I) -> Self
    where
        I: IntoIterator<Item = ServiceError>,
    {
        let structured_errors: Vec<ServiceError> = errors.into_iter().collect();
        let errors = structured_errors
            .iter()
            .map(|error| error.message().to_owned())
            .collect();
        Self {
            data: empty,
            is_success: false,
            errors,
            structured_errors,
        }
    }

    /// Failure described by a single structured error.
    pub fn failure_with_error(empty: T, error: ServiceError) -> Self {
        Self::failure_with_errors(empty, [error])
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.is_success
    }

    /// Payload, or the empty sentinel on failure.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume the result, returning the payload.
    pub fn into_data(self) -> T {
        self.data
    }

    /// String errors in the order they were recorded.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Structured errors in the order they were recorded.
    pub fn structured_errors(&self) -> &[ServiceError] {
        &self.structured_errors
    }

    /// Code that best classifies the failure.
    ///
    /// The first structured error decides; a failure carrying only strings
    /// reports [`ServiceErrorCode::ValidationFailed`]. Successful results
    /// have no code.
    pub fn primary_error_code(&self) -> Option<ServiceErrorCode> {
        if self.is_success {
            return None;
        }
        Some(
            self.structured_errors
                .first()
                .map_or(ServiceErrorCode::ValidationFailed, ServiceError::code),
        )
    }

    /// The failure as one [`ServiceError`], if the result failed.
    ///
    /// Structured failures surface their first error; string failures are
    /// joined into a single `ValidationFailed` error.
    pub fn primary_error(&self) -> Option<ServiceError> {
        self.primary_error_joined_by(DEFAULT_MESSAGE_SEPARATOR)
    }

    /// Like [`primary_error`](Self::primary_error), joining string failures
    /// with the separator configured in `settings`.
    pub fn primary_error_with(&self, settings: &ValidationSettings) -> Option<ServiceError> {
        self.primary_error_joined_by(settings.message_separator())
    }

    fn primary_error_joined_by(&self, separator: &str) -> Option<ServiceError> {
        if self.is_success {
            return None;
        }
        if let Some(first) = self.structured_errors.first() {
            return Some(first.clone());
        }
        Some(ServiceError::validation_failed(self.errors.join(separator)))
    }

    /// Fold the envelope into a standard [`Result`].
    pub fn into_result(self) -> Result<T, ServiceError> {
        match self.primary_error() {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }

    /// Like [`into_result`](Self::into_result), using the separator
    /// configured in `settings`.
    pub fn into_result_with(self, settings: &ValidationSettings) -> Result<T, ServiceError> {
        match self.primary_error_with(settings) {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }

    /// Transform the payload, keeping the errors untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResult<U> {
        ServiceResult {
            data: f(self.data),
            is_success: self.is_success,
            errors: self.errors,
            structured_errors: self.structured_errors,
        }
    }
}
