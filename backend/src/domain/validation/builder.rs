//! Fluent validation builder and its terminal operations.
//!
//! A builder is created per operation, collects rules through chained calls
//! and is consumed by exactly one terminal call. Synchronous rules are
//! evaluated as they are registered; asynchronous rules wait in an
//! [`AsyncRuleQueue`] until the terminal call, and are skipped entirely when
//! a synchronous rule has already failed.

use std::future::Future;
use std::marker::PhantomData;

use tracing::debug;

use super::error::ValidationError;
use super::outcome::{UNREPORTED_FAILURE, ValidationFailure, ValidationResult};
use super::rules::{AsyncRuleQueue, Gate};
use super::state::ValidationState;
use crate::domain::{Empty, ServiceError, ServiceResult};
use crate::settings::{DEFAULT_MESSAGE_SEPARATOR, ValidationSettings};

/// Entry point for validation chains.
///
/// # Examples
/// ```
/// use futures::executor::block_on;
/// use service_validation::domain::{ServiceErrorCode, ServiceResult, ServiceValidate};
///
/// let name = "  ";
/// let result: ServiceResult<String> = block_on(
///     ServiceValidate::build::<String>()
///         .ensure_not_white_space(name, "Name is required")
///         .ensure_async(|| async { true }, "unreachable")
///         .match_or_failure(|| async { ServiceResult::success(name.to_owned()) }),
/// );
///
/// assert!(!result.is_success());
/// assert_eq!(result.errors(), ["Name is required"]);
/// assert_eq!(result.primary_error_code(), Some(ServiceErrorCode::ValidationFailed));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ServiceValidate;

impl ServiceValidate {
    /// Start a chain for an operation producing `T`.
    pub fn build<'a, T>() -> ValidationBuilder<'a, T> {
        ValidationBuilder::with_separator(DEFAULT_MESSAGE_SEPARATOR)
    }

    /// Start a chain that renders failures according to `settings`.
    pub fn build_with<'a, T>(settings: &ValidationSettings) -> ValidationBuilder<'a, T> {
        ValidationBuilder::with_separator(settings.message_separator())
    }

    /// Start a chain for an operation with no payload.
    ///
    /// Useful when only [`ValidationBuilder::to_validation_result`] is needed.
    pub fn for_command<'a>() -> ValidationBuilder<'a, ()> {
        Self::build()
    }
}

/// Observable lifecycle of a live builder.
///
/// A consumed builder no longer exists: terminal calls take it by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No rule registered yet.
    Empty,
    /// At least one rule registered.
    Accumulating,
}

/// Ordered set of validation rules for one operation returning `T`.
///
/// `'a` bounds whatever the deferred rules borrow, typically repositories
/// and request fields owned by the calling service.
#[must_use = "a validation chain does nothing until a terminal call awaits it"]
pub struct ValidationBuilder<'a, T> {
    state: ValidationState,
    deferred: AsyncRuleQueue<'a>,
    separator: String,
    registered: usize,
    payload: PhantomData<fn() -> T>,
}

impl<'a, T> ValidationBuilder<'a, T> {
    fn with_separator(separator: &str) -> Self {
        Self {
            state: ValidationState::new(),
            deferred: AsyncRuleQueue::new(),
            separator: separator.to_owned(),
            registered: 0,
            payload: PhantomData,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BuilderState {
        if self.registered == 0 {
            BuilderState::Empty
        } else {
            BuilderState::Accumulating
        }
    }

    /// Whether a synchronous rule has already failed.
    pub fn has_errors(&self) -> bool {
        self.state.has_errors()
    }

    /// Evaluate `predicate` now; record `error` if it is false.
    pub fn ensure(
        mut self,
        predicate: impl FnOnce() -> bool,
        error: impl Into<ValidationError>,
    ) -> Self {
        self.registered += 1;
        self.state.ensure(predicate, error);
        self
    }

    /// Evaluate `predicate` now, unless an earlier rule already failed.
    pub fn ensure_when_valid(
        mut self,
        predicate: impl FnOnce() -> bool,
        error: impl Into<ValidationError>,
    ) -> Self {
        self.registered += 1;
        self.state.ensure_when_valid(predicate, error);
        self
    }

    /// Queue `predicate` for the terminal call.
    pub fn ensure_async<F, Fut>(mut self, predicate: F, error: impl Into<ValidationError>) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.registered += 1;
        self.deferred
            .push_predicate(predicate, error.into(), Gate::Always);
        self
    }

    /// Queue `predicate`; at its turn it is skipped if any rule has failed.
    pub fn ensure_async_when_valid<F, Fut>(
        mut self,
        predicate: F,
        error: impl Into<ValidationError>,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        self.registered += 1;
        self.deferred
            .push_predicate(predicate, error.into(), Gate::WhenValid);
        self
    }

    /// Fold an already computed [`ValidationResult`] into the chain.
    ///
    /// A structured error is recorded as such; otherwise each message is
    /// appended. A failure without any error still fails the chain. A valid
    /// result records nothing.
    pub fn validate_with(mut self, result: ValidationResult) -> Self {
        self.registered += 1;
        if result.is_valid() {
            return self;
        }
        match result.service_error() {
            Some(error) => self.state.record(error.clone().into()),
            None if result.errors().is_empty() => {
                self.state.record(UNREPORTED_FAILURE.into());
            }
            None => {
                for message in result.errors() {
                    self.state.record(message.as_str().into());
                }
            }
        }
        self
    }

    /// Queue a check that reports any number of errors.
    pub(super) fn defer_fold<F, Fut>(mut self, fold: F, gate: Gate) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Vec<ValidationError>> + Send + 'a,
    {
        self.registered += 1;
        self.deferred.push_fold(fold, gate);
        self
    }

    async fn execute(self) -> Option<ValidationFailure> {
        let Self {
            mut state,
            deferred,
            separator,
            registered,
            ..
        } = self;

        if state.has_errors() {
            debug!(
                registered,
                pending = deferred.len(),
                "synchronous validation failed; deferred rules not run"
            );
            return state.into_failure(&separator);
        }

        let run = deferred.run(&mut state).await;
        let failure = state.into_failure(&separator);
        debug!(
            registered,
            executed = run.executed,
            skipped = run.skipped,
            valid = failure.is_none(),
            structured = failure.as_ref().is_some_and(ValidationFailure::has_structured),
            "validation chain finished"
        );
        failure
    }

    /// Run the chain and report the outcome as a [`ValidationResult`].
    pub async fn to_validation_result(self) -> ValidationResult {
        match self.execute().await {
            None => ValidationResult::success(),
            Some(failure) => failure.into_validation_result(),
        }
    }

    /// Run the chain, then call `when_valid` or `when_invalid`.
    ///
    /// `when_invalid` receives every message in order, the structured
    /// error's message last. `when_valid` only starts after every deferred
    /// rule has resolved.
    pub async fn match_messages<V, Fut, I>(self, when_valid: V, when_invalid: I) -> ServiceResult<T>
    where
        V: FnOnce() -> Fut,
        Fut: Future<Output = ServiceResult<T>>,
        I: FnOnce(Vec<String>) -> ServiceResult<T>,
    {
        match self.execute().await {
            None => when_valid().await,
            Some(failure) => when_invalid(failure.messages()),
        }
    }

    /// Run the chain, then call `when_valid` or `when_invalid`.
    ///
    /// `when_invalid` receives the aggregated structured error when one was
    /// recorded, otherwise one `ValidationFailed` error per message.
    pub async fn match_errors<V, Fut, I>(self, when_valid: V, when_invalid: I) -> ServiceResult<T>
    where
        V: FnOnce() -> Fut,
        Fut: Future<Output = ServiceResult<T>>,
        I: FnOnce(Vec<ServiceError>) -> ServiceResult<T>,
    {
        match self.execute().await {
            None => when_valid().await,
            Some(failure) => when_invalid(failure.service_errors()),
        }
    }

    /// Run the chain, failing with the payload's empty value on error.
    pub async fn match_or_failure<V, Fut>(self, when_valid: V) -> ServiceResult<T>
    where
        T: Empty,
        V: FnOnce() -> Fut,
        Fut: Future<Output = ServiceResult<T>>,
    {
        match self.execute().await {
            None => when_valid().await,
            Some(failure) => failure.into_service_result(T::empty()),
        }
    }
}
