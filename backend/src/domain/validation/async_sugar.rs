//! Shorthand for deferred rules backed by repository probes.
//!
//! Each rule pairs a caller-supplied async check with a canned
//! [`ServiceError`]. Checks are phrased positively: they return `true` when
//! the operation may proceed.

use std::future::Future;

use crate::domain::{ServiceError, ServiceResult};

use super::builder::ValidationBuilder;
use super::error::ValidationError;
use super::outcome::UNREPORTED_FAILURE;
use super::rules::Gate;

fn service_result_errors<U>(result: &ServiceResult<U>) -> Vec<ValidationError> {
    if result.is_success() {
        return Vec::new();
    }
    if result.structured_errors().is_empty() && result.errors().is_empty() {
        return vec![ValidationError::from(UNREPORTED_FAILURE)];
    }
    if result.structured_errors().is_empty() {
        result
            .errors()
            .iter()
            .map(|message| ValidationError::from(message.as_str()))
            .collect()
    } else {
        result
            .structured_errors()
            .iter()
            .cloned()
            .map(ValidationError::from)
            .collect()
    }
}

impl<'a, T> ValidationBuilder<'a, T> {
    /// Queue a uniqueness check, failing with `AlreadyExists(entity, name)`.
    pub fn ensure_name_is_unique_async<F, Fut>(self, is_unique: F, entity: &str, name: &str) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async(is_unique, ServiceError::already_exists(entity, name))
    }

    /// Skippable form of
    /// [`ensure_name_is_unique_async`](Self::ensure_name_is_unique_async).
    pub fn ensure_name_is_unique_async_when_valid<F, Fut>(
        self,
        is_unique: F,
        entity: &str,
        name: &str,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async_when_valid(is_unique, ServiceError::already_exists(entity, name))
    }

    /// Queue a uniqueness check reporting `error` when a clash is found.
    pub fn ensure_is_unique_async<F, Fut>(self, is_unique: F, error: ServiceError) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async(is_unique, error)
    }

    /// Skippable form of [`ensure_is_unique_async`](Self::ensure_is_unique_async).
    pub fn ensure_is_unique_async_when_valid<F, Fut>(
        self,
        is_unique: F,
        error: ServiceError,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async_when_valid(is_unique, error)
    }

    /// Queue a check that something does not exist yet.
    ///
    /// `does_not_exist` returns `true` when the item is absent.
    pub fn ensure_not_exists_async<F, Fut>(
        self,
        does_not_exist: F,
        error: ServiceError,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async(does_not_exist, error)
    }

    /// Skippable form of [`ensure_not_exists_async`](Self::ensure_not_exists_async).
    pub fn ensure_not_exists_async_when_valid<F, Fut>(
        self,
        does_not_exist: F,
        error: ServiceError,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async_when_valid(does_not_exist, error)
    }

    /// Queue an existence check, failing with `NotFound(entity)`.
    pub fn ensure_exists_async<F, Fut>(self, exists: F, entity: &str) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async(exists, ServiceError::not_found(entity))
    }

    /// Skippable form of [`ensure_exists_async`](Self::ensure_exists_async).
    pub fn ensure_exists_async_when_valid<F, Fut>(self, exists: F, entity: &str) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async_when_valid(exists, ServiceError::not_found(entity))
    }

    /// Queue a configuration check, failing with `ValidationFailed(message)`.
    pub fn ensure_has_valid_async<F, Fut>(self, has_valid: F, message: impl Into<String>) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async(has_valid, ServiceError::validation_failed(message))
    }

    /// Skippable form of [`ensure_has_valid_async`](Self::ensure_has_valid_async).
    pub fn ensure_has_valid_async_when_valid<F, Fut>(
        self,
        has_valid: F,
        message: impl Into<String>,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.ensure_async_when_valid(has_valid, ServiceError::validation_failed(message))
    }

    /// Queue a nested operation whose failure fails this chain.
    ///
    /// The nested result's structured errors are recorded when it has any,
    /// otherwise its string errors. A failure carrying neither still fails
    /// the chain.
    pub fn ensure_service_result_async<U, F, Fut>(self, operation: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = ServiceResult<U>> + Send + 'a,
    {
        self.defer_fold(
            move || async move { service_result_errors(&operation().await) },
            Gate::Always,
        )
    }

    /// Skippable form of
    /// [`ensure_service_result_async`](Self::ensure_service_result_async).
    pub fn ensure_service_result_async_when_valid<U, F, Fut>(self, operation: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = ServiceResult<U>> + Send + 'a,
    {
        self.defer_fold(
            move || async move { service_result_errors(&operation().await) },
            Gate::WhenValid,
        )
    }
}
