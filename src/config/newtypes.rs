//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction, so a client can
//! never be built around an empty token or a URL without a scheme.

use crate::error::ConfigError;
use std::fmt;

/// A validated identity service auth token.
///
/// The `Debug` implementation masks the token so it cannot leak into logs.
///
/// # Example
///
/// ```rust
/// use attestation_client::AuthToken;
///
/// let token = AuthToken::new("gAAAAABk-token").unwrap();
/// assert_eq!(token.as_ref(), "gAAAAABk-token");
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new validated auth token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAuthToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

/// A validated base URL of an identity service endpoint.
///
/// Any trailing `/` is trimmed so that request paths can always be joined
/// with a single separator.
///
/// # Example
///
/// ```rust
/// use attestation_client::EndpointUrl;
///
/// let url = EndpointUrl::new("https://identity.example.com:35357/v2.0/").unwrap();
/// assert_eq!(url.as_ref(), "https://identity.example.com:35357/v2.0");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "identity.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL has no scheme
    /// or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidEndpointUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a relative request path onto this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
