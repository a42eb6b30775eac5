//! Accumulator shared by every rule of one validation chain.

use tracing::debug;

use super::error::ValidationError;
use super::outcome::ValidationFailure;
use crate::domain::ServiceError;

/// Errors collected so far: ordered messages plus at most one structured
/// error.
///
/// ## Invariants
/// - `has_errors()` is true exactly when a message or a structured error has
///   been recorded.
/// - The structured slot is written once. A later structured error is
///   discarded, code and message alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    errors: Vec<String>,
    structured_error: Option<ServiceError>,
}

impl ValidationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any rule has failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.structured_error.is_some()
    }

    /// Plain messages in the order they were recorded.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The first structured error, if any rule produced one.
    pub fn structured_error(&self) -> Option<&ServiceError> {
        self.structured_error.as_ref()
    }

    /// Record the error of a failed rule.
    pub fn record(&mut self, error: ValidationError) {
        match error {
            ValidationError::Message(message) => self.errors.push(message),
            ValidationError::Structured(error) => {
                if self.structured_error.is_none() {
                    self.structured_error = Some(error);
                } else {
                    debug!(
                        code = ?error.code(),
                        "structured error already recorded; discarding later one"
                    );
                }
            }
        }
    }

    /// Evaluate `predicate` now and record `error` if it does not hold.
    pub fn ensure(&mut self, predicate: impl FnOnce() -> bool, error: impl Into<ValidationError>) {
        if !predicate() {
            self.record(error.into());
        }
    }

    /// Like [`ensure`](Self::ensure), but `predicate` is not evaluated at all
    /// once the state holds an error.
    pub fn ensure_when_valid(
        &mut self,
        predicate: impl FnOnce() -> bool,
        error: impl Into<ValidationError>,
    ) {
        if self.has_errors() {
            return;
        }
        self.ensure(predicate, error);
    }

    /// Consume the state, yielding the failure if any rule failed.
    pub(crate) fn into_failure(self, separator: &str) -> Option<ValidationFailure> {
        if !self.has_errors() {
            return None;
        }
        Some(ValidationFailure::new(
            self.errors,
            self.structured_error,
            separator,
        ))
    }
}
