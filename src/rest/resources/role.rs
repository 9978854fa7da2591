//! Roles and role grants.
//!
//! Role definitions live under `OS-KSADM/roles`. Grants attach a role to an
//! account either globally (`users/{user_id}/roles/OS-KSADM/{id}`) or within
//! one tenant (`tenants/{tenant_id}/users/{user_id}/roles/OS-KSADM/{id}`).

use serde_json::{json, Value};

use crate::clients::{HttpClient, HttpMethod, Transport};
use crate::rest::{
    envelope, resolve_id, AsResourceId, Dispatch, Manager, Resource, ResourceError, ResourceId,
    ResourceKind, ResourceOperation, ResourcePath,
};

/// Marker for roles.
#[derive(Debug, Clone, Copy)]
pub struct RoleKind;

impl ResourceKind for RoleKind {
    const NAME: &'static str = "Role";
    const KEY: &'static str = "role";
    const PLURAL: &'static str = "roles";
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "OS-KSADM/roles/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &[],
            "OS-KSADM/roles",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["user_id"],
            "users/{user_id}/roles",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["tenant_id", "user_id"],
            "tenants/{tenant_id}/users/{user_id}/roles",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "OS-KSADM/roles",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["user_id", "id"],
            "users/{user_id}/roles/OS-KSADM/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["tenant_id", "user_id", "id"],
            "tenants/{tenant_id}/users/{user_id}/roles/OS-KSADM/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "OS-KSADM/roles/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["user_id", "id"],
            "users/{user_id}/roles/OS-KSADM/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["tenant_id", "user_id", "id"],
            "tenants/{tenant_id}/users/{user_id}/roles/OS-KSADM/{id}",
        ),
    ];
}

/// Manager for roles.
pub type RoleManager<'a, T = HttpClient> = Manager<'a, RoleKind, T>;

/// A role definition.
pub type Role<'a, T = HttpClient> = Resource<'a, RoleKind, T>;

fn grant_ids(
    user: ResourceId,
    role: ResourceId,
    tenant: Option<&dyn AsResourceId>,
) -> Result<Vec<(&'static str, ResourceId)>, ResourceError> {
    let mut ids = vec![("user_id", user), ("id", role)];
    if let Some(tenant) = tenant {
        ids.push(("tenant_id", resolve_id(tenant)?));
    }
    Ok(ids)
}

impl<'a, T: Transport> Manager<'a, RoleKind, T> {
    /// Fetches one role.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is invalid or the request fails.
    pub async fn get<I: AsResourceId + ?Sized>(&self, role: &I) -> Result<Role<'a, T>, ResourceError> {
        self.find_by_id(role).await
    }

    /// Lists every role definition.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list(&self) -> Result<Vec<Role<'a, T>>, ResourceError> {
        self.all(&[], Vec::new()).await
    }

    /// Creates a role.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(&self, name: &str) -> Result<Role<'a, T>, ResourceError> {
        let (method, url) = self.path(ResourceOperation::Create, &[])?;
        let body = envelope(RoleKind::KEY, &json!({ "name": name }))?;
        self.fetch_one(Dispatch::new(method, url).body(body)).await
    }

    /// Lists the roles granted to an account, globally or within a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if an id is invalid or the request fails.
    pub async fn roles_for_user<I: AsResourceId + ?Sized>(
        &self,
        user: &I,
        tenant: Option<&dyn AsResourceId>,
    ) -> Result<Vec<Role<'a, T>>, ResourceError> {
        let mut ids = vec![("user_id", resolve_id(user)?)];
        if let Some(tenant) = tenant {
            ids.push(("tenant_id", resolve_id(tenant)?));
        }
        self.all(&ids, Vec::new()).await
    }

    /// Grants a role to an account.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if an id is invalid or the request fails.
    pub async fn add_user_role<U, R>(
        &self,
        user: &U,
        role: &R,
        tenant: Option<&dyn AsResourceId>,
    ) -> Result<Role<'a, T>, ResourceError>
    where
        U: AsResourceId + ?Sized,
        R: AsResourceId + ?Sized,
    {
        let ids = grant_ids(resolve_id(user)?, resolve_id(role)?, tenant)?;
        let (method, url) = self.path(ResourceOperation::Update, &ids)?;
        self.fetch_one(Dispatch::new(method, url)).await
    }

    /// Revokes a role from an account. Returns the raw transport result.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if an id is invalid or the request fails.
    pub async fn remove_user_role<U, R>(
        &self,
        user: &U,
        role: &R,
        tenant: Option<&dyn AsResourceId>,
    ) -> Result<Value, ResourceError>
    where
        U: AsResourceId + ?Sized,
        R: AsResourceId + ?Sized,
    {
        let ids = grant_ids(resolve_id(user)?, resolve_id(role)?, tenant)?;
        let (method, url) = self.path(ResourceOperation::Delete, &ids)?;
        self.dispatch(Dispatch::new(method, url).raw()).await
    }
}

impl<T: Transport> Resource<'_, RoleKind, T> {
    /// Role name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }
}
