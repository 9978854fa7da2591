//! Error types for manager operations.
//!
//! [`ResourceError`] covers three families:
//!
//! - **Transport failures** ([`ResourceError::Http`]): passed through
//!   unchanged from the transport.
//! - **Unexpected response shape** ([`ResourceError::MissingResponseKey`],
//!   [`ResourceError::UnexpectedShape`]): a successful body that cannot be
//!   unwrapped.
//! - **Caller misuse** (every other variant): raised before any request is
//!   sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use attestation_client::rest::ResourceError;
//!
//! match client.attestations().get("k-1").await {
//!     Ok(key) => println!("Found: {key}"),
//!     Err(ResourceError::Http(e)) => println!("Transport error: {e}"),
//!     Err(ResourceError::MissingResponseKey { key }) => println!("No '{key}' in response"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for manager operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The response body has no value under the expected key.
    #[error("Response body has no '{key}' key")]
    MissingResponseKey {
        /// The key that was looked up.
        key: String,
    },

    /// The value under the response key has the wrong JSON type.
    #[error("Expected {expected} under '{key}' in response body")]
    UnexpectedShape {
        /// The key that was looked up.
        key: String,
        /// What the manager expected to find (e.g., "an object").
        expected: &'static str,
    },

    /// A resource was passed where an identifier is required, but it has
    /// no `id` attribute.
    #[error("{resource} has no 'id' attribute")]
    MissingId {
        /// The resource kind name (e.g., "Attestation").
        resource: &'static str,
    },

    /// An identifier is malformed (e.g., empty).
    #[error("Invalid identifier: {reason}")]
    InvalidId {
        /// Why the identifier was rejected.
        reason: String,
    },

    /// A self-service operation was called on a client without a current
    /// user id.
    #[error("Operation requires the current user id, but the client has none")]
    MissingUserId,

    /// An argument could not be converted to the form the API expects.
    #[error("Invalid value for '{argument}': {reason}")]
    InvalidArgument {
        /// The argument name.
        argument: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A field set contained a key the resource kind does not recognise.
    #[error("Unknown field '{field}' for {resource}")]
    UnknownField {
        /// The resource kind name.
        resource: &'static str,
        /// The unrecognised key.
        field: String,
    },

    /// No path is defined for the operation with the provided IDs.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The resource kind name.
        resource: &'static str,
        /// The operation being attempted (e.g., "find", "all", "delete").
        operation: &'static str,
    },

    /// A request body or field set could not be converted to or from JSON.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The transport failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the service request ID if this is a transport error that
    /// carries one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this is a non-2xx transport error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(HttpError::Response(e)) => Some(e.code),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
