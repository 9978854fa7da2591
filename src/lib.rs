//! # Attestation Client
//!
//! A Rust client for an identity service's attestation key and account
//! administration APIs.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for endpoints and tokens
//! - An explicit [`Session`] describing the authenticated principal
//! - An async HTTP transport ([`HttpClient`]) behind the [`clients::Transport`] trait
//! - The Resource/Manager pattern in [`rest`]: attribute-bag resources,
//!   per-kind managers, resource-or-id arguments and keyed or raw responses
//!
//! ## Quick Start
//!
//! ```rust
//! use attestation_client::{AuthToken, ClientConfig, EndpointUrl, IdentityClient, Session};
//!
//! let config = ClientConfig::builder()
//!     .management_url(EndpointUrl::new("https://identity.example.com:35357/v2.0").unwrap())
//!     .public_url(EndpointUrl::new("https://identity.example.com:5000/v2.0").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let session = Session::new(
//!     Some(AuthToken::new("gAAAAABk-token").unwrap()),
//!     Some("u-1001".into()),
//!     None,
//! );
//!
//! let client = IdentityClient::new(&session, &config).unwrap();
//! assert!(client.user_id().is_some());
//! ```
//!
//! ## Working With Keys and Accounts
//!
//! ```rust,ignore
//! use attestation_client::rest::resources::{
//!     AttestationQuery, AttestationUpdate, ListParams, NewAttestation, ValidationRequest,
//! };
//!
//! let keys = client.attestations();
//!
//! // Raw operations return the body verbatim
//! let created = keys.create(&new_key).await?;
//! let found = keys.find(&AttestationQuery::new("node-1", "nova")).await?;
//!
//! // Single-entity operations return a Resource
//! let key = keys.get("k-1").await?;
//! let user = keys.update_enabled(&key, false).await?;
//!
//! // Listings keep server order
//! for user in keys.list(&ListParams::new().tenant("t-1").limit(50)).await? {
//!     println!("{user}");
//! }
//!
//! // Self-service password change on the public endpoint
//! keys.update_own_password("old", "new").await?;
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (one `debug` event per dispatched
//! request) and never installs a subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: the client context is passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction and misuse
//!   is reported before any request is sent
//! - **No retries**: transport failures reach the caller unchanged
//! - **Thread-safe**: all types are `Send + Sync` when the transport is

mod client;

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use client::IdentityClient;

// Re-export public types at crate root for convenience
pub use auth::Session;
pub use config::{AuthToken, ClientConfig, ClientConfigBuilder, EndpointUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};

// Re-export resource types
pub use rest::resources::{Attestation, AttestationManager, Role, RoleManager};
pub use rest::{AsResourceId, Resource, ResourceError, ResourceId};
