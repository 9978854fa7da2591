//! Resource/Manager infrastructure for the identity service REST API.
//!
//! This module provides:
//!
//! - **[`Resource`]**: a server-returned attribute bag bound to its manager
//! - **[`Manager`]**: request construction, dispatch and unwrapping for one
//!   [`ResourceKind`]
//! - **[`Dispatch`]**: per-call verb, endpoint, response key and raw mode
//! - **Identifier resolution**: [`AsResourceId`] and [`resolve_id`] accept a
//!   resource or a bare id wherever an id is needed
//! - **Path building**: per-kind [`ResourcePath`] tables with
//!   most-specific-match selection
//! - **[`ResourceError`]**: errors for manager operations
//!
//! # Example
//!
//! ```rust,ignore
//! use attestation_client::rest::resources::AttestationUpdate;
//!
//! let keys = client.attestations();
//!
//! // Single entity, unwrapped from "key_data"
//! let key = keys.get("k-1").await?;
//! println!("{} on {:?}", key, key.hostname());
//!
//! // A resource works anywhere an id is expected
//! let update = AttestationUpdate { enabled: Some(false), ..Default::default() };
//! let user = keys.update(&key, &update).await?;
//!
//! // Delete through the resource's own manager
//! user.delete().await?;
//! ```

mod errors;
mod id;
mod manager;
mod path;
mod resource;

pub mod resources;

#[cfg(test)]
pub(crate) mod test_support;

// Public exports
pub use errors::ResourceError;
pub use id::{resolve_id, AsResourceId, ResourceId};
pub use manager::{envelope, envelope_with_id, Dispatch, Manager};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{Resource, ResourceKind};
