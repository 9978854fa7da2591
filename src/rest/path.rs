//! Path building for resource operations.
//!
//! A resource kind declares a table of [`ResourcePath`]s, one per way an
//! operation can be addressed. The same operation may appear with different
//! ID sets: listing accounts is `users` on its own and
//! `tenants/{tenant_id}/users` when a tenant is supplied. [`get_path`] picks
//! the most specific path whose IDs are all available.
//!
//! # Example
//!
//! ```rust
//! use attestation_client::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use attestation_client::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "users"),
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::All,
//!         &["tenant_id"],
//!         "tenants/{tenant_id}/users",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::All, &["tenant_id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("tenant_id", "t-1");
//! assert_eq!(build_path(path.template, &ids), "tenants/t-1/users");
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations addressed through a kind's path table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single entity.
    Find,
    /// List a collection.
    All,
    /// Create an entity.
    Create,
    /// Update an entity or grant a relationship.
    Update,
    /// Delete an entity or revoke a relationship.
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Find | Self::All => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// How to address one operation with one set of IDs.
///
/// Templates use `{id_name}` placeholders, e.g. `attestation/{id}` or
/// `tenants/{tenant_id}/users/{user_id}/roles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required ID parameters.
    pub ids: &'static [&'static str],
    /// The URL template with `{id}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required IDs for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required IDs are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the most specific path for an operation.
///
/// Among the paths for `operation` whose required IDs are all in
/// `available_ids`, the one requiring the most IDs wins.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Interpolates IDs into a URL template.
///
/// Values are percent-encoded so that an id can never introduce an extra
/// path segment. Placeholders without a value are left untouched.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let value = value.to_string();
        result = result.replace(&placeholder, &urlencoding::encode(&value));
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
