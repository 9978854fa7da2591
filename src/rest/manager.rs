//! The generic manager: request construction, dispatch and unwrapping.
//!
//! Every kind-specific manager is a [`Manager`] with a fixed
//! [`ResourceKind`]. The generic operations here cover what all kinds share:
//!
//! 1. Resolve "resource or id" arguments with
//!    [`resolve_id`](crate::rest::resolve_id).
//! 2. Pick a path from the kind's table and interpolate the ids.
//! 3. Send one [`HttpRequest`] through the client's [`Transport`].
//! 4. Return the body verbatim (raw mode) or unwrap the response key and
//!    wrap it in [`Resource`]s.
//!
//! Transport failures are propagated unchanged and nothing is retried.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::IdentityClient;
use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest, Transport};
use crate::rest::{
    build_path, get_path, resolve_id, AsResourceId, Resource, ResourceError, ResourceId,
    ResourceKind, ResourceOperation,
};

/// Per-call dispatch parameters.
///
/// Defaults: the kind's entity key as response key, the administrative
/// endpoint, and unwrapped (non-raw) responses.
///
/// # Example
///
/// ```rust
/// use attestation_client::rest::Dispatch;
/// use attestation_client::HttpMethod;
/// use serde_json::json;
///
/// let dispatch = Dispatch::new(HttpMethod::Patch, "OS-KSCRUD/users/u-1")
///     .body(json!({"user": {"password": "new"}}))
///     .response_key("access")
///     .management(false);
///
/// assert!(!dispatch.management);
/// assert!(!dispatch.return_raw);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    /// Path relative to the selected endpoint.
    pub url: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Key to unwrap; `None` means the kind's entity key.
    pub response_key: Option<String>,
    /// Administrative (`true`) or self-service (`false`) endpoint.
    pub management: bool,
    /// Return the parsed body verbatim.
    pub return_raw: bool,
}

impl Dispatch {
    /// Creates a dispatch with default settings.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            query: Vec::new(),
            response_key: None,
            management: true,
            return_raw: false,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Overrides the response key.
    #[must_use]
    pub fn response_key(mut self, key: impl Into<String>) -> Self {
        self.response_key = Some(key.into());
        self
    }

    /// Selects the endpoint.
    #[must_use]
    pub const fn management(mut self, management: bool) -> Self {
        self.management = management;
        self
    }

    /// Returns the parsed body verbatim instead of unwrapping it.
    #[must_use]
    pub const fn raw(mut self) -> Self {
        self.return_raw = true;
        self
    }
}

/// Wraps serialized fields in a single-key envelope: `{key: {...}}`.
///
/// # Errors
///
/// Returns [`ResourceError::Json`] if `fields` cannot be serialized.
///
/// # Example
///
/// ```rust
/// use attestation_client::rest::envelope;
/// use serde_json::json;
///
/// let body = envelope("role", &json!({"name": "admin"})).unwrap();
/// assert_eq!(body, json!({"role": {"name": "admin"}}));
/// ```
pub fn envelope<S: Serialize + ?Sized>(key: &str, fields: &S) -> Result<Value, ResourceError> {
    let mut outer = Map::new();
    outer.insert(key.to_string(), serde_json::to_value(fields)?);
    Ok(Value::Object(outer))
}

/// Like [`envelope`], with `id` always injected into the inner mapping.
///
/// An `id` present in `fields` is overwritten by the resolved one.
///
/// # Errors
///
/// Returns [`ResourceError::Json`] if `fields` cannot be serialized and
/// [`ResourceError::InvalidArgument`] if they do not serialize to an object.
pub fn envelope_with_id<S: Serialize + ?Sized>(
    key: &str,
    id: &ResourceId,
    fields: &S,
) -> Result<Value, ResourceError> {
    let mut inner = match serde_json::to_value(fields)? {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(ResourceError::InvalidArgument {
                argument: "fields",
                reason: format!("expected a JSON object, got {other}"),
            })
        }
    };
    inner.insert("id".to_string(), id.to_value());

    let mut outer = Map::new();
    outer.insert(key.to_string(), Value::Object(inner));
    Ok(Value::Object(outer))
}

/// Orchestrates operations for one resource kind.
///
/// A manager is a copyable handle: it borrows the shared
/// [`IdentityClient`] and carries the kind as a type parameter. It holds no
/// other state.
pub struct Manager<'a, K, T = HttpClient> {
    api: &'a IdentityClient<T>,
    kind: PhantomData<fn() -> K>,
}

impl<K, T> Clone for Manager<'_, K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, T> Copy for Manager<'_, K, T> {}

impl<K: ResourceKind, T> fmt::Debug for Manager<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("kind", &K::NAME)
            .finish_non_exhaustive()
    }
}

impl<'a, K: ResourceKind, T: Transport> Manager<'a, K, T> {
    /// Creates a manager bound to `api`.
    #[must_use]
    pub const fn new(api: &'a IdentityClient<T>) -> Self {
        Self {
            api,
            kind: PhantomData,
        }
    }

    /// Returns the shared client context.
    #[must_use]
    pub const fn api(&self) -> &'a IdentityClient<T> {
        self.api
    }

    /// Wraps an attribute mapping in a resource of this kind.
    #[must_use]
    pub const fn instantiate(&self, info: Map<String, Value>) -> Resource<'a, K, T> {
        Resource::new(*self, info)
    }

    /// Resolves the kind's path for `operation` with the given ids.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if no path for the
    /// operation can be built from the available ids.
    pub fn path(
        &self,
        operation: ResourceOperation,
        ids: &[(&str, ResourceId)],
    ) -> Result<(HttpMethod, String), ResourceError> {
        let available: Vec<&str> = ids.iter().map(|(name, _)| *name).collect();
        let path = get_path(K::PATHS, operation, &available).ok_or(
            ResourceError::PathResolutionFailed {
                resource: K::NAME,
                operation: operation.as_str(),
            },
        )?;

        let values: HashMap<&str, &ResourceId> =
            ids.iter().map(|(name, value)| (*name, value)).collect();
        Ok((path.http_method, build_path(path.template, &values)))
    }

    /// Sends one request and returns the raw or unwrapped body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for any transport failure and
    /// [`ResourceError::MissingResponseKey`] if the response key is absent.
    pub async fn dispatch(&self, dispatch: Dispatch) -> Result<Value, ResourceError> {
        let Dispatch {
            url,
            method,
            body,
            query,
            response_key,
            management,
            return_raw,
        } = dispatch;

        tracing::debug!(
            resource = K::NAME,
            method = %method,
            path = %url,
            management,
            "Dispatching resource request"
        );

        let mut builder = HttpRequest::builder(method, url)
            .query(query)
            .management(management);
        if let Some(body) = body {
            builder = builder.body(body).body_type(DataType::Json);
        }
        let request = builder.build().map_err(HttpError::from)?;

        let response = self.api.transport().send(request).await?;
        if return_raw {
            return Ok(response.body);
        }

        let key = response_key.unwrap_or_else(|| K::KEY.to_string());
        match response.body {
            Value::Object(mut map) => match map.remove(&key) {
                Some(value) => Ok(value),
                None => Err(ResourceError::MissingResponseKey { key }),
            },
            _ => Err(ResourceError::MissingResponseKey { key }),
        }
    }

    /// Dispatches and wraps the unwrapped object in a resource.
    ///
    /// # Errors
    ///
    /// As [`dispatch`](Self::dispatch), plus
    /// [`ResourceError::UnexpectedShape`] if the value is not an object.
    pub async fn fetch_one(&self, dispatch: Dispatch) -> Result<Resource<'a, K, T>, ResourceError> {
        let key = Self::unwrap_key(&dispatch);
        match self.dispatch(dispatch).await? {
            Value::Object(info) => Ok(self.instantiate(info)),
            _ => Err(ResourceError::UnexpectedShape {
                key,
                expected: "an object",
            }),
        }
    }

    /// Dispatches and wraps each element of the unwrapped sequence, in
    /// order.
    ///
    /// # Errors
    ///
    /// As [`dispatch`](Self::dispatch), plus
    /// [`ResourceError::UnexpectedShape`] if the value is not an array of
    /// objects.
    pub async fn fetch_many(
        &self,
        dispatch: Dispatch,
    ) -> Result<Vec<Resource<'a, K, T>>, ResourceError> {
        let key = Self::unwrap_key(&dispatch);
        let Value::Array(items) = self.dispatch(dispatch).await? else {
            return Err(ResourceError::UnexpectedShape {
                key,
                expected: "an array",
            });
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::Object(info) => Ok(self.instantiate(info)),
                _ => Err(ResourceError::UnexpectedShape {
                    key: key.clone(),
                    expected: "an array of objects",
                }),
            })
            .collect()
    }

    /// Fetches one entity by id from the kind's `Find` path.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id cannot be resolved or the request
    /// fails.
    pub async fn find_by_id<I: AsResourceId + ?Sized>(
        &self,
        id: &I,
    ) -> Result<Resource<'a, K, T>, ResourceError> {
        let id = resolve_id(id)?;
        let (method, url) = self.path(ResourceOperation::Find, &[("id", id)])?;
        self.fetch_one(Dispatch::new(method, url)).await
    }

    /// Lists entities from the most specific `All` path for `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if no path matches or the request fails.
    pub async fn all(
        &self,
        ids: &[(&str, ResourceId)],
        query: Vec<(String, String)>,
    ) -> Result<Vec<Resource<'a, K, T>>, ResourceError> {
        let (method, url) = self.path(ResourceOperation::All, ids)?;
        self.fetch_many(
            Dispatch::new(method, url)
                .query(query)
                .response_key(K::PLURAL),
        )
        .await
    }

    /// Deletes an entity, returning the raw transport result.
    ///
    /// The service answers deletes with an empty body, which comes back as
    /// [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id cannot be resolved or the request
    /// fails.
    pub async fn delete<I: AsResourceId + ?Sized>(&self, target: &I) -> Result<Value, ResourceError> {
        let id = resolve_id(target)?;
        let (method, url) = self.path(ResourceOperation::Delete, &[("id", id)])?;
        self.dispatch(Dispatch::new(method, url).raw()).await
    }

    fn unwrap_key(dispatch: &Dispatch) -> String {
        dispatch
            .response_key
            .clone()
            .unwrap_or_else(|| K::KEY.to_string())
    }
}

// Verify managers are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dispatch>();
    assert_send_sync::<Manager<'static, crate::rest::resources::AttestationKind>>();
};
