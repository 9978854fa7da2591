//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails before it ever touches the network.
//!
//! # Example
//!
//! ```rust
//! use attestation_client::{AuthToken, ConfigError};
//!
//! let result = AuthToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAuthToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Auth token cannot be empty.
    #[error("Auth token cannot be empty. Please provide the token issued by the identity service.")]
    EmptyAuthToken,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a URL with scheme (e.g., 'https://identity.example.com:35357/v2.0').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
