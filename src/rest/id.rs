//! Identifier resolution.
//!
//! Every parameter that accepts "a resource or its id" is typed as
//! [`AsResourceId`]. Bare identifiers resolve to themselves and resources
//! resolve to their `id` attribute, so
//! `resolve_id(&resource) == resolve_id(&bare_id)` whenever
//! `resource.id == bare_id`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::ResourceError;

/// A bare identifier as used in URLs and request bodies.
///
/// The service issues both string ids (UUID-like) and numeric ids. Both are
/// kept in their original JSON type so that ids re-injected into request
/// bodies round-trip unchanged.
///
/// # Example
///
/// ```rust
/// use attestation_client::rest::ResourceId;
///
/// assert_eq!(ResourceId::from("a1b2").to_string(), "a1b2");
/// assert_eq!(ResourceId::from(42_u64).to_string(), "42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// A numeric identifier.
    Number(u64),
    /// A string identifier.
    String(String),
}

impl ResourceId {
    /// Reads an identifier from a JSON value.
    ///
    /// Returns `None` for anything other than a string or an unsigned
    /// integer.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Number(n) => n.as_u64().map(Self::Number),
            _ => None,
        }
    }

    /// Returns the identifier as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::String(s) => Value::from(s.as_str()),
        }
    }

    /// Returns `true` for an empty string identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::String(s) if s.trim().is_empty())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        Self::Number(u64::from(value))
    }
}

/// Anything that can stand in for a resource identifier.
///
/// Implemented for bare ids (`&str`, `String`, `u64`, `u32`,
/// [`ResourceId`]) and for [`Resource`](crate::rest::Resource).
pub trait AsResourceId {
    /// Resolves `self` to a bare identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] for an empty identifier and
    /// [`ResourceError::MissingId`] for a resource without an `id`.
    fn resource_id(&self) -> Result<ResourceId, ResourceError>;
}

impl AsResourceId for ResourceId {
    fn resource_id(&self) -> Result<ResourceId, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::InvalidId {
                reason: "identifier is empty".to_string(),
            });
        }
        Ok(self.clone())
    }
}

impl AsResourceId for str {
    fn resource_id(&self) -> Result<ResourceId, ResourceError> {
        ResourceId::from(self).resource_id()
    }
}

impl AsResourceId for String {
    fn resource_id(&self) -> Result<ResourceId, ResourceError> {
        self.as_str().resource_id()
    }
}

impl AsResourceId for u64 {
    fn resource_id(&self) -> Result<ResourceId, ResourceError> {
        Ok(ResourceId::Number(*self))
    }
}

impl AsResourceId for u32 {
    fn resource_id(&self) -> Result<ResourceId, ResourceError> {
        Ok(ResourceId::from(*self))
    }
}

impl<T: AsResourceId + ?Sized> AsResourceId for &T {
    fn resource_id(&self) -> Result<ResourceId, ResourceError> {
        (**self).resource_id()
    }
}

/// Resolves a resource or bare id to a bare identifier.
///
/// # Errors
///
/// See [`AsResourceId::resource_id`].
///
/// # Example
///
/// ```rust
/// use attestation_client::rest::{resolve_id, ResourceId};
///
/// assert_eq!(resolve_id("k-1").unwrap(), ResourceId::from("k-1"));
/// assert!(resolve_id("").is_err());
/// ```
pub fn resolve_id<I: AsResourceId + ?Sized>(value: &I) -> Result<ResourceId, ResourceError> {
    value.resource_id()
}
