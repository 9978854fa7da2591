//! Attestation keys and the accounts administered alongside them.
//!
//! Host key records live under `attestation/...` and are wrapped in
//! `key_data`. Account administration (update, enable, password, default
//! tenant, delete, list) goes through `users/...` and is wrapped in `user`.
//!
//! # Example
//!
//! ```rust,ignore
//! use attestation_client::rest::resources::{AttestationQuery, ListParams};
//!
//! let keys = client.attestations();
//!
//! let key = keys.get("k-1").await?;
//! println!("{key}");
//!
//! let found = keys
//!     .find(&AttestationQuery::new("node-1.example.com", "nova"))
//!     .await?;
//!
//! let users = keys.list(&ListParams::new().limit_from_str("5")?).await?;
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::clients::{HttpClient, HttpMethod, Transport};
use crate::rest::resources::Role;
use crate::rest::{
    build_path, envelope, envelope_with_id, resolve_id, AsResourceId, Dispatch, Manager, Resource,
    ResourceError, ResourceId, ResourceKind, ResourceOperation, ResourcePath,
};

/// Envelope key for account bodies.
const ACCOUNT_KEY: &str = "user";

const ENABLED_PATH: &str = "users/{id}/OS-KSADM/enabled";
const PASSWORD_PATH: &str = "users/{id}/OS-KSADM/password";
const TENANT_PATH: &str = "users/{id}/OS-KSADM/tenant";
const OWN_PASSWORD_PATH: &str = "OS-KSCRUD/users/{id}";
const FIND_PATH: &str = "attestation/find";
const VALIDATE_PATH: &str = "attestation/validate";

/// Marker for attestation key records.
#[derive(Debug, Clone, Copy)]
pub struct AttestationKind;

impl ResourceKind for AttestationKind {
    const NAME: &'static str = "Attestation";
    const KEY: &'static str = "key_data";
    const PLURAL: &'static str = "users";
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "attestation/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "attestation",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "users/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "users/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "users"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["tenant_id"],
            "tenants/{tenant_id}/users",
        ),
    ];
}

/// Manager for attestation keys and accounts.
pub type AttestationManager<'a, T = HttpClient> = Manager<'a, AttestationKind, T>;

/// An attestation key record or account.
pub type Attestation<'a, T = HttpClient> = Resource<'a, AttestationKind, T>;

/// Fields accepted by [`AttestationManager::update`].
///
/// Unset fields are left out of the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationUpdate {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the account may authenticate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Default tenant. Accepted by the service but not reliably applied;
    /// prefer [`AttestationManager::update_tenant`].
    #[serde(
        rename = "tenantId",
        alias = "tenant_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub tenant_id: Option<ResourceId>,
}

impl AttestationUpdate {
    const FIELDS: &'static [&'static str] = &["name", "email", "enabled", "tenantId", "tenant_id"];

    /// Builds an update from a loose field mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownField`] for a key outside the
    /// supported set and [`ResourceError::Json`] for a value of the wrong
    /// type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attestation_client::rest::resources::AttestationUpdate;
    /// use serde_json::json;
    ///
    /// let fields = json!({"email": "ops@example.com"}).as_object().unwrap().clone();
    /// let update = AttestationUpdate::from_fields(fields).unwrap();
    /// assert_eq!(update.email.as_deref(), Some("ops@example.com"));
    ///
    /// let bad = json!({"colour": "red"}).as_object().unwrap().clone();
    /// assert!(AttestationUpdate::from_fields(bad).is_err());
    /// ```
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, ResourceError> {
        if let Some(field) = fields.keys().find(|key| !Self::FIELDS.contains(&key.as_str())) {
            return Err(ResourceError::UnknownField {
                resource: AttestationKind::NAME,
                field: field.clone(),
            });
        }
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// A new host key record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewAttestation {
    /// Host the key belongs to.
    pub hostname: String,
    /// Platform configuration register values, passed through as given.
    #[serde(rename = "PCRs")]
    pub pcrs: Value,
    /// Authentication scheme.
    pub auth_type: String,
    /// Host UUID.
    pub uuid: String,
    /// Public key material.
    pub pkey: String,
    /// Unsalted measurement hash.
    pub pure_hash: String,
    /// Service the key is registered for.
    pub service: String,
}

/// Lookup of a key record by host and service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationQuery {
    /// Host name.
    pub hostname: String,
    /// Service name.
    pub service: String,
}

impl AttestationQuery {
    /// Creates a query.
    #[must_use]
    pub fn new(hostname: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            service: service.into(),
        }
    }
}

/// A salted-hash validation request against a stored key record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// Key record id.
    pub id: ResourceId,
    /// Hash of the measurement combined with `salt`.
    pub salted_hash: String,
    /// Salt used to produce `salted_hash`.
    pub salt: String,
}

/// Parameters for [`AttestationManager::list`].
///
/// Only present, non-empty values reach the wire: a `limit` of `0` and an
/// empty `marker` are omitted, and an empty tenant selects the unscoped
/// endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Restrict the listing to one tenant.
    pub tenant_id: Option<ResourceId>,
    /// Maximum number of entries.
    pub limit: Option<u32>,
    /// Opaque cursor returned by a previous listing.
    pub marker: Option<String>,
}

impl ListParams {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scopes the listing to a tenant.
    #[must_use]
    pub fn tenant(mut self, tenant_id: impl Into<ResourceId>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page size from text, e.g. a command-line argument.
    ///
    /// An empty string leaves the limit unset.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `limit` is not a
    /// non-negative integer.
    pub fn limit_from_str(mut self, limit: &str) -> Result<Self, ResourceError> {
        let limit = limit.trim();
        if limit.is_empty() {
            self.limit = None;
            return Ok(self);
        }
        let parsed = limit
            .parse::<u32>()
            .map_err(|e| ResourceError::InvalidArgument {
                argument: "limit",
                reason: format!("'{limit}' is not a valid count: {e}"),
            })?;
        self.limit = Some(parsed);
        Ok(self)
    }

    /// Sets the pagination cursor.
    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Returns the query parameters to send, in `limit`, `marker` order.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(marker) = self.marker.as_deref().filter(|m| !m.is_empty()) {
            query.push(("marker".to_string(), marker.to_string()));
        }
        query
    }

    fn scope(&self) -> Vec<(&'static str, ResourceId)> {
        self.tenant_id
            .iter()
            .filter(|tenant| !tenant.is_empty())
            .map(|tenant| ("tenant_id", tenant.clone()))
            .collect()
    }
}

fn account_path(template: &str, id: &ResourceId) -> String {
    let mut ids = HashMap::new();
    ids.insert("id", id);
    build_path(template, &ids)
}

impl<'a, T: Transport> Manager<'a, AttestationKind, T> {
    /// Fetches one key record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is invalid, the request fails, or
    /// the response has no `key_data` object.
    pub async fn get<I: AsResourceId + ?Sized>(
        &self,
        id: &I,
    ) -> Result<Attestation<'a, T>, ResourceError> {
        self.find_by_id(id).await
    }

    /// Registers a host key and returns the service's answer verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(&self, new: &NewAttestation) -> Result<Value, ResourceError> {
        let (method, url) = self.path(ResourceOperation::Create, &[])?;
        let body = envelope(AttestationKind::KEY, new)?;
        self.dispatch(Dispatch::new(method, url).body(body).raw())
            .await
    }

    /// Updates account fields. The resolved id is always part of the body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is invalid or the request fails.
    pub async fn update<I: AsResourceId + ?Sized>(
        &self,
        target: &I,
        fields: &AttestationUpdate,
    ) -> Result<Attestation<'a, T>, ResourceError> {
        let id = resolve_id(target)?;
        let body = envelope_with_id(ACCOUNT_KEY, &id, fields)?;
        let (method, url) = self.path(ResourceOperation::Update, &[("id", id)])?;
        self.fetch_one(
            Dispatch::new(method, url)
                .body(body)
                .response_key(ACCOUNT_KEY),
        )
        .await
    }

    /// Enables or disables an account.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is invalid or the request fails.
    pub async fn update_enabled<I: AsResourceId + ?Sized>(
        &self,
        target: &I,
        enabled: bool,
    ) -> Result<Attestation<'a, T>, ResourceError> {
        self.update_account(ENABLED_PATH, target, &json!({ "enabled": enabled }))
            .await
    }

    /// Sets an account's password.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is invalid or the request fails.
    pub async fn update_password<I: AsResourceId + ?Sized>(
        &self,
        target: &I,
        password: &str,
    ) -> Result<Attestation<'a, T>, ResourceError> {
        self.update_account(PASSWORD_PATH, target, &json!({ "password": password }))
            .await
    }

    /// Sets an account's default tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if either id is invalid or the request
    /// fails.
    pub async fn update_tenant<I, U>(
        &self,
        target: &I,
        tenant: &U,
    ) -> Result<Attestation<'a, T>, ResourceError>
    where
        I: AsResourceId + ?Sized,
        U: AsResourceId + ?Sized,
    {
        let tenant = resolve_id(tenant)?;
        self.update_account(TENANT_PATH, target, &json!({ "tenantId": tenant }))
            .await
    }

    /// Changes the current user's own password on the self-service
    /// endpoint.
    ///
    /// The answer is unwrapped from `access`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingUserId`] if the client was built
    /// without a user id, and otherwise any failure of the request.
    pub async fn update_own_password(
        &self,
        original: &str,
        password: &str,
    ) -> Result<Attestation<'a, T>, ResourceError> {
        let user_id = self.api().user_id().ok_or(ResourceError::MissingUserId)?;
        let body = json!({
            "user": {
                "password": password,
                "original_password": original,
            }
        });

        self.fetch_one(
            Dispatch::new(HttpMethod::Patch, account_path(OWN_PASSWORD_PATH, user_id))
                .body(body)
                .response_key("access")
                .management(false),
        )
        .await
    }

    /// Lists accounts, optionally scoped to a tenant, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `users` array.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Attestation<'a, T>>, ResourceError> {
        self.all(&params.scope(), params.query()).await
    }

    /// Looks up key records by host and service. The body is returned
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn find(&self, query: &AttestationQuery) -> Result<Value, ResourceError> {
        self.post_raw(FIND_PATH, query).await
    }

    /// Checks a salted hash against a stored key record. The body is
    /// returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn validate(&self, request: &ValidationRequest) -> Result<Value, ResourceError> {
        self.post_raw(VALIDATE_PATH, request).await
    }

    /// Lists the roles granted to an account, globally or within a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if an id is invalid or the request fails.
    pub async fn list_roles<I: AsResourceId + ?Sized>(
        &self,
        user: &I,
        tenant: Option<&dyn AsResourceId>,
    ) -> Result<Vec<Role<'a, T>>, ResourceError> {
        self.api().roles().roles_for_user(user, tenant).await
    }

    async fn update_account<I: AsResourceId + ?Sized>(
        &self,
        template: &str,
        target: &I,
        fields: &Value,
    ) -> Result<Attestation<'a, T>, ResourceError> {
        let id = resolve_id(target)?;
        let body = envelope_with_id(ACCOUNT_KEY, &id, fields)?;
        self.fetch_one(
            Dispatch::new(HttpMethod::Put, account_path(template, &id))
                .body(body)
                .response_key(ACCOUNT_KEY),
        )
        .await
    }

    async fn post_raw<S: Serialize>(
        &self,
        url: &str,
        fields: &S,
    ) -> Result<Value, ResourceError> {
        let body = envelope(AttestationKind::KEY, fields)?;
        self.dispatch(Dispatch::new(HttpMethod::Post, url).body(body).raw())
            .await
    }
}

impl<T: Transport> Resource<'_, AttestationKind, T> {
    /// Host the key belongs to.
    #[must_use]
    pub fn hostname(&self) -> Option<&str> {
        self.get_str("hostname")
    }

    /// Service the key is registered for.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.get_str("service")
    }

    /// Host UUID.
    #[must_use]
    pub fn uuid(&self) -> Option<&str> {
        self.get_str("uuid")
    }

    /// Authentication scheme.
    #[must_use]
    pub fn auth_type(&self) -> Option<&str> {
        self.get_str("auth_type")
    }

    /// Public key material.
    #[must_use]
    pub fn pkey(&self) -> Option<&str> {
        self.get_str("pkey")
    }

    /// Unsalted measurement hash.
    #[must_use]
    pub fn pure_hash(&self) -> Option<&str> {
        self.get_str("pure_hash")
    }

    /// Platform configuration register values.
    #[must_use]
    pub fn pcrs(&self) -> Option<&Value> {
        self.get("PCRs")
    }

    /// Whether the account is enabled.
    #[must_use]
    pub fn enabled(&self) -> Option<bool> {
        self.get("enabled").and_then(Value::as_bool)
    }
}
