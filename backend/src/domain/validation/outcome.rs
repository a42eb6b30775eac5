//! Validation outcomes and the aggregation of collected errors.

use serde::{Deserialize, Serialize};

use crate::domain::{ServiceError, ServiceResult};

/// Message recorded when a folded result failed without saying why.
pub(crate) const UNREPORTED_FAILURE: &str = "Operation failed without reporting an error";

/// Generic outcome of a validation chain.
///
/// On failure `errors` lists the plain messages followed by the structured
/// error's message, and `service_error` carries the aggregated structured
/// error when one was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_error: Option<ServiceError>,
}

impl ValidationResult {
    /// Every rule passed.
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            service_error: None,
        }
    }

    /// Failure described by plain messages.
    pub fn failure<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_valid: false,
            errors: errors.into_iter().map(Into::into).collect(),
            service_error: None,
        }
    }

    /// Failure described by one structured error.
    pub fn failure_with_error(error: ServiceError) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.message().to_owned()],
            service_error: Some(error),
        }
    }

    /// Whether every rule passed.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Collected messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Aggregated structured error, if any.
    pub fn service_error(&self) -> Option<&ServiceError> {
        self.service_error.as_ref()
    }
}

/// Errors left behind by a failed chain, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidationFailure {
    messages: Vec<String>,
    structured: Option<ServiceError>,
    separator: String,
}

impl ValidationFailure {
    pub(crate) fn new(
        messages: Vec<String>,
        structured: Option<ServiceError>,
        separator: &str,
    ) -> Self {
        Self {
            messages,
            structured,
            separator: separator.to_owned(),
        }
    }

    /// The structured error with every plain message folded into it.
    ///
    /// The code of the first structured error is kept; the message becomes
    /// the plain messages followed by the structured message.
    pub(crate) fn service_error(&self) -> Option<ServiceError> {
        let structured = self.structured.as_ref()?;
        if self.messages.is_empty() {
            return Some(structured.clone());
        }
        let mut parts: Vec<&str> = self.messages.iter().map(String::as_str).collect();
        parts.push(structured.message());
        Some(structured.with_message(parts.join(self.separator.as_str())))
    }

    /// Every message, structured message last.
    pub(crate) fn messages(&self) -> Vec<String> {
        let mut messages = self.messages.clone();
        if let Some(structured) = &self.structured {
            messages.push(structured.message().to_owned());
        }
        messages
    }

    /// Errors as structured values.
    ///
    /// A structured failure yields the single aggregated error; a failure
    /// made only of messages yields one `ValidationFailed` error each.
    pub(crate) fn service_errors(&self) -> Vec<ServiceError> {
        match self.service_error() {
            Some(error) => vec![error],
            None => self
                .messages
                .iter()
                .map(|message| ServiceError::validation_failed(message.as_str()))
                .collect(),
        }
    }

    pub(crate) fn has_structured(&self) -> bool {
        self.structured.is_some()
    }

    pub(crate) fn into_validation_result(self) -> ValidationResult {
        ValidationResult {
            is_valid: false,
            errors: self.messages(),
            service_error: self.service_error(),
        }
    }

    pub(crate) fn into_service_result<T>(self, empty: T) -> ServiceResult<T> {
        match self.service_error() {
            Some(error) => ServiceResult::failure_with_error(empty, error),
            None => ServiceResult::failure(empty, self.messages),
        }
    }
}
