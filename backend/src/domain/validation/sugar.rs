//! Shorthand for common synchronous rules.
//!
//! Every method is a thin wrapper over [`ValidationBuilder::ensure`], so the
//! usual ordering and first-wins rules apply. Length checks count `char`s,
//! not bytes.

use crate::domain::{Empty, ServiceError, ServiceErrorCode};

use super::builder::ValidationBuilder;
use super::error::ValidationError;

fn char_count(value: &str) -> usize {
    value.chars().count()
}

impl<'a, T> ValidationBuilder<'a, T> {
    /// Require a value containing at least one non-whitespace character.
    ///
    /// An absent value fails.
    pub fn ensure_not_white_space<'v>(
        self,
        value: impl Into<Option<&'v str>>,
        error: impl Into<ValidationError>,
    ) -> Self {
        let value = value.into();
        self.ensure(
            || value.is_some_and(|text| !text.trim().is_empty()),
            error,
        )
    }

    /// Require at most `max` characters. An absent value passes.
    pub fn ensure_max_length<'v>(
        self,
        value: impl Into<Option<&'v str>>,
        max: usize,
        error: impl Into<ValidationError>,
    ) -> Self {
        let value = value.into();
        self.ensure(|| value.is_none_or(|text| char_count(text) <= max), error)
    }

    /// Require at least `min` characters. An absent value fails.
    pub fn ensure_min_length<'v>(
        self,
        value: impl Into<Option<&'v str>>,
        min: usize,
        error: impl Into<ValidationError>,
    ) -> Self {
        let value = value.into();
        self.ensure(|| value.is_some_and(|text| char_count(text) >= min), error)
    }

    /// Require between `min` and `max` characters, inclusive. An absent
    /// value fails.
    pub fn ensure_length<'v>(
        self,
        value: impl Into<Option<&'v str>>,
        min: usize,
        max: usize,
        error: impl Into<ValidationError>,
    ) -> Self {
        let value = value.into();
        self.ensure(
            || value.is_some_and(|text| (min..=max).contains(&char_count(text))),
            error,
        )
    }

    /// Require a present value.
    pub fn ensure_not_null<V: ?Sized>(
        self,
        value: Option<&V>,
        error: impl Into<ValidationError>,
    ) -> Self {
        self.ensure(|| value.is_some(), error)
    }

    /// Require `min <= value <= max`.
    pub fn ensure_number_between<N: PartialOrd>(
        self,
        value: N,
        min: N,
        max: N,
        error: impl Into<ValidationError>,
    ) -> Self {
        self.ensure(|| min <= value && value <= max, error)
    }

    /// Like [`ensure_number_between`](Self::ensure_number_between); an absent
    /// value passes.
    pub fn ensure_optional_number_between<N: PartialOrd>(
        self,
        value: Option<N>,
        min: N,
        max: N,
        error: impl Into<ValidationError>,
    ) -> Self {
        self.ensure(
            || value.is_none_or(|number| min <= number && number <= max),
            error,
        )
    }

    /// Require at most `max` items. An absent collection passes.
    pub fn ensure_max_count<E>(
        self,
        items: Option<&[E]>,
        max: usize,
        error: impl Into<ValidationError>,
    ) -> Self {
        self.ensure(|| items.is_none_or(|items| items.len() <= max), error)
    }

    /// Require a non-empty identifier, failing with `InvalidFormat`.
    pub fn ensure_not_empty<I: Empty>(self, id: &I, message: impl Into<String>) -> Self {
        self.ensure(
            || !Empty::is_empty(id),
            ServiceError::new(ServiceErrorCode::InvalidFormat, message),
        )
    }

    /// Like [`ensure_not_empty`](Self::ensure_not_empty); an absent
    /// identifier passes.
    pub fn ensure_not_empty_if_present<I: Empty>(
        self,
        id: Option<&I>,
        message: impl Into<String>,
    ) -> Self {
        self.ensure(
            || id.is_none_or(|id| !Empty::is_empty(id)),
            ServiceError::new(ServiceErrorCode::InvalidFormat, message),
        )
    }

    /// Require a present, non-empty identifier, failing with `InvalidFormat`.
    pub fn ensure_valid_id<I: Empty>(self, id: Option<&I>, message: impl Into<String>) -> Self {
        self.ensure(
            || id.is_some_and(|id| !Empty::is_empty(id)),
            ServiceError::new(ServiceErrorCode::InvalidFormat, message),
        )
    }
}
