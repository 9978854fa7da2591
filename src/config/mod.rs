//! Configuration types for the attestation client.
//!
//! - [`ClientConfig`]: endpoints and HTTP settings shared by every request
//! - [`ClientConfigBuilder`]: builder for [`ClientConfig`]
//! - [`EndpointUrl`]: a validated endpoint base URL
//! - [`AuthToken`]: a validated token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use attestation_client::{ClientConfig, EndpointUrl};
//!
//! let config = ClientConfig::builder()
//!     .management_url(EndpointUrl::new("https://identity.example.com:35357/v2.0").unwrap())
//!     .public_url(EndpointUrl::new("https://identity.example.com:5000/v2.0").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.public_url().host_name(), "identity.example.com");
//! ```

mod newtypes;

pub use newtypes::{AuthToken, EndpointUrl};

use crate::error::ConfigError;

/// Configuration for the attestation client.
///
/// The management URL addresses the administrative API. The public URL is
/// used for self-service calls and falls back to the management URL when it
/// is not configured.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    management_url: EndpointUrl,
    public_url: Option<EndpointUrl>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the administrative endpoint.
    #[must_use]
    pub const fn management_url(&self) -> &EndpointUrl {
        &self.management_url
    }

    /// Returns the self-service endpoint.
    #[must_use]
    pub fn public_url(&self) -> &EndpointUrl {
        self.public_url.as_ref().unwrap_or(&self.management_url)
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `management_url` is required. Everything else is optional.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    management_url: Option<EndpointUrl>,
    public_url: Option<EndpointUrl>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the administrative endpoint (required).
    #[must_use]
    pub fn management_url(mut self, url: EndpointUrl) -> Self {
        self.management_url = Some(url);
        self
    }

    /// Sets the self-service endpoint.
    #[must_use]
    pub fn public_url(mut self, url: EndpointUrl) -> Self {
        self.public_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `management_url` is
    /// not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let management_url = self
            .management_url
            .ok_or(ConfigError::MissingRequiredField {
                field: "management_url",
            })?;

        Ok(ClientConfig {
            management_url,
            public_url: self.public_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
