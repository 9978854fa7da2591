//! Resources: server-returned attribute bags bound to their manager.
//!
//! A [`Resource`] is a thin view over the JSON object the service returned
//! for one entity. It keeps the attributes in server order, derives its
//! identity from the `id` attribute, and remembers the [`Manager`] that
//! produced it so that [`Resource::delete`] can be issued without naming the
//! kind again.
//!
//! Resource kinds are zero-sized markers implementing [`ResourceKind`]. A
//! kind supplies the envelope key for single entities, the collection key for
//! listings, and the table of [`ResourcePath`]s its manager dispatches to.

use std::fmt;

use serde_json::{Map, Value};

use crate::clients::{HttpClient, Transport};
use crate::rest::{AsResourceId, Manager, ResourceError, ResourceId, ResourcePath};

/// A kind of server-side entity.
///
/// # Example
///
/// ```rust
/// use attestation_client::rest::{ResourceKind, ResourceOperation, ResourcePath};
/// use attestation_client::HttpMethod;
///
/// struct TenantKind;
///
/// impl ResourceKind for TenantKind {
///     const NAME: &'static str = "Tenant";
///     const KEY: &'static str = "tenant";
///     const PLURAL: &'static str = "tenants";
///     const PATHS: &'static [ResourcePath] = &[
///         ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "tenants/{id}"),
///         ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "tenants"),
///     ];
/// }
/// ```
pub trait ResourceKind: 'static {
    /// Display name used in diagnostics and errors (e.g., "Attestation").
    const NAME: &'static str;

    /// Response key holding a single entity.
    const KEY: &'static str;

    /// Response key holding a collection.
    const PLURAL: &'static str;

    /// Paths for the generic manager operations.
    const PATHS: &'static [ResourcePath];
}

/// One server-side entity.
///
/// Equality and formatting derive from [`info`](Self::info) only: two
/// resources with the same attributes are equal whichever manager produced
/// them. Dropping a resource never issues a request.
pub struct Resource<'a, K, T = HttpClient> {
    info: Map<String, Value>,
    manager: Manager<'a, K, T>,
}

impl<'a, K: ResourceKind, T: Transport> Resource<'a, K, T> {
    /// Wraps an attribute mapping. No shape validation is performed.
    #[must_use]
    pub const fn new(manager: Manager<'a, K, T>, info: Map<String, Value>) -> Self {
        Self { info, manager }
    }

    /// Returns the attributes exactly as the service returned them.
    #[must_use]
    pub const fn info(&self) -> &Map<String, Value> {
        &self.info
    }

    /// Consumes the resource, returning its attributes.
    #[must_use]
    pub fn into_info(self) -> Map<String, Value> {
        self.info
    }

    /// Returns a single attribute.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.info.get(field)
    }

    /// Returns a string attribute, or `None` if absent or not a string.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.info.get(field).and_then(Value::as_str)
    }

    /// Returns the `id` attribute, if present and usable as an identifier.
    #[must_use]
    pub fn id(&self) -> Option<ResourceId> {
        self.info.get("id").and_then(ResourceId::from_value)
    }

    /// Returns the manager that produced this resource.
    #[must_use]
    pub const fn manager(&self) -> Manager<'a, K, T> {
        self.manager
    }

    /// Deletes this entity through its manager.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the resource has no `id`, and
    /// otherwise whatever the manager's delete returns.
    pub async fn delete(&self) -> Result<Value, ResourceError> {
        self.manager.delete(self).await
    }
}

impl<K: ResourceKind, T> AsResourceId for Resource<'_, K, T> {
    fn resource_id(&self) -> Result<ResourceId, ResourceError> {
        self.info
            .get("id")
            .and_then(ResourceId::from_value)
            .ok_or(ResourceError::MissingId { resource: K::NAME })?
            .resource_id()
    }
}

impl<K, T> Clone for Resource<'_, K, T> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            manager: self.manager,
        }
    }
}

impl<K, T> PartialEq for Resource<'_, K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info
    }
}

impl<K: ResourceKind, T> fmt::Debug for Resource<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::NAME).field("info", &self.info).finish()
    }
}

impl<K: ResourceKind, T> fmt::Display for Resource<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", K::NAME, Value::Object(self.info.clone()))
    }
}
