//! Prefixed entity identifiers and the empty-sentinel pattern.
//!
//! Identifiers travel as `"{prefix}-{uuid}"` strings. Parsing is lenient at
//! the service boundary: [`SpecializedId::parse_or_empty`] turns anything
//! malformed into the empty identifier, which validation rules then reject
//! with an `InvalidFormat` error.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Values with a distinguished "empty" sentinel.
///
/// Failed service results carry the sentinel instead of real data, and
/// identifier rules treat an empty value as missing.
pub trait Empty {
    /// The sentinel value.
    fn empty() -> Self;

    /// Whether this value is the sentinel.
    fn is_empty(&self) -> bool;
}

impl Empty for () {
    fn empty() -> Self {}

    fn is_empty(&self) -> bool {
        true
    }
}

impl Empty for bool {
    fn empty() -> Self {
        false
    }

    fn is_empty(&self) -> bool {
        !*self
    }
}

impl Empty for String {
    fn empty() -> Self {
        Self::new()
    }

    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }
}

impl<T> Empty for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }

    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }
}

impl<T> Empty for Option<T> {
    fn empty() -> Self {
        None
    }

    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

/// Marker describing one identifier family.
///
/// ```
/// use service_validation::domain::{IdKind, SpecializedId};
///
/// struct Exercise;
/// impl IdKind for Exercise {
///     const PREFIX: &'static str = "exercise";
/// }
///
/// let id = SpecializedId::<Exercise>::parse_or_empty("not-an-id");
/// assert!(id.is_empty());
/// ```
pub trait IdKind {
    /// Prefix preceding the UUID in the string form.
    const PREFIX: &'static str;
}

/// Errors raised while parsing a [`SpecializedId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecializedIdError {
    /// The value does not start with `"{prefix}-"`.
    #[error("identifier must start with '{prefix}-'")]
    MissingPrefix {
        /// Expected prefix.
        prefix: &'static str,
    },
    /// The text after the prefix is not a UUID.
    #[error("identifier suffix is not a valid UUID")]
    InvalidUuid,
}

/// Identifier of a `K` entity backed by a UUID.
///
/// The nil UUID is the empty identifier.
pub struct SpecializedId<K> {
    uuid: Uuid,
    kind: PhantomData<fn() -> K>,
}

impl<K: IdKind> SpecializedId<K> {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            kind: PhantomData,
        }
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }

    /// Human-readable shape, used in `InvalidFormat` messages.
    pub fn expected_format() -> String {
        format!("{}-{{guid}}", K::PREFIX)
    }

    /// Parse the `"{prefix}-{uuid}"` form.
    pub fn parse(value: &str) -> Result<Self, SpecializedIdError> {
        let suffix = value
            .strip_prefix(K::PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or(SpecializedIdError::MissingPrefix { prefix: K::PREFIX })?;
        let uuid = Uuid::parse_str(suffix).map_err(|_| SpecializedIdError::InvalidUuid)?;
        Ok(Self::from_uuid(uuid))
    }

    /// Parse the string form, yielding the empty identifier on any failure.
    pub fn parse_or_empty(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|_| <Self as Empty>::empty())
    }

    /// Whether this is the empty identifier.
    pub fn is_empty(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<K: IdKind> Empty for SpecializedId<K> {
    fn empty() -> Self {
        Self::from_uuid(Uuid::nil())
    }

    fn is_empty(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<K> Clone for SpecializedId<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SpecializedId<K> {}

impl<K> PartialEq for SpecializedId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<K> Eq for SpecializedId<K> {}

impl<K> Hash for SpecializedId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<K: IdKind> fmt::Debug for SpecializedId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SpecializedId").field(&self.to_string()).finish()
    }
}

impl<K: IdKind> fmt::Display for SpecializedId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", K::PREFIX, self.uuid)
    }
}

impl<K: IdKind> FromStr for SpecializedId<K> {
    type Err = SpecializedIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: IdKind> Serialize for SpecializedId<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, K: IdKind> Deserialize<'de> for SpecializedId<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
