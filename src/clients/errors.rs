//! Transport error types.
//!
//! - [`HttpResponseError`]: non-2xx responses from the identity service
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpError`]: unified error type for everything the transport can raise
//!
//! # Example
//!
//! ```rust,ignore
//! use attestation_client::clients::{HttpError, Transport};
//!
//! match client.send(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidBody { code, .. }) => println!("Unreadable {code} body"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the service answers with a non-successful status.
///
/// `message` carries the service's own error message when the body has the
/// usual `{"error": {"message": ..., "code": ..., "title": ...}}` shape and
/// the raw body text otherwise.
///
/// # Example
///
/// ```rust
/// use attestation_client::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Could not find user: 42".to_string(),
///     error_reference: Some("req-4c1d".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404: Could not find user: 42");
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The error message reported by the service.
    pub message: String,
    /// Request ID for error reporting (from `x-openstack-request-id`).
    pub error_reference: Option<String>,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// A successful response whose body is not valid JSON.
    #[error("Malformed response body (HTTP {code}): {source}")]
    InvalidBody {
        /// The HTTP status code of the response.
        code: u16,
        /// The JSON parse failure.
        source: serde_json::Error,
    },

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
