//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the identity service.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the identity service API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and lookups.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP PATCH method for self-service updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// An HTTP request to be sent to the identity service.
///
/// `management` selects the administrative endpoint (`true`) or the
/// self-service endpoint (`false`).
///
/// # Example
///
/// ```rust
/// use attestation_client::clients::{DataType, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "attestation/find")
///     .body(json!({"key_data": {"hostname": "node-1", "service": "nova"}}))
///     .body_type(DataType::Json)
///     .build()
///     .unwrap();
///
/// assert!(request.management);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to the endpoint base URL.
    pub path: String,
    /// The request body, if any.
    pub body: Option<serde_json::Value>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// Query parameters in the order they are serialized.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Whether the request targets the administrative endpoint.
    pub management: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `body` is `Some` but `body_type` is `None`
    /// - `http_method` is `Post` or `Patch` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        // PUT is allowed without a body (role grants)
        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Patch) && self.body.is_none()
        {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }

    /// Returns the query string (without the leading `?`), or `None` when
    /// no parameters are set.
    #[must_use]
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect();
        Some(pairs.join("&"))
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    body_type: Option<DataType>,
    query: Vec<(String, String)>,
    extra_headers: Option<HashMap<String, String>>,
    management: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            body_type: None,
            query: Vec::new(),
            extra_headers: None,
            management: true,
        }
    }

    /// Sets the request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Selects the administrative (`true`, default) or self-service endpoint.
    #[must_use]
    pub const fn management(mut self, management: bool) -> Self {
        self.management = management;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            body_type: self.body_type,
            query: self.query,
            extra_headers: self.extra_headers,
            management: self.management,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_defaults_to_management_endpoint() {
        let request = HttpRequest::builder(HttpMethod::Get, "users")
            .build()
            .unwrap();

        assert!(request.management);
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
        assert!(request.query_string().is_none());
    }

    #[test]
    fn test_verify_requires_body_for_post_and_patch() {
        let post = HttpRequest::builder(HttpMethod::Post, "attestation").build();
        assert!(matches!(
            post,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));

        let patch = HttpRequest::builder(HttpMethod::Patch, "OS-KSCRUD/users/1").build();
        assert!(matches!(
            patch,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "patch"
        ));
    }

    #[test]
    fn test_verify_allows_bodiless_put() {
        let request = HttpRequest::builder(HttpMethod::Put, "users/1/roles/OS-KSADM/2").build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_verify_requires_body_type_when_body_present() {
        let result = HttpRequest::builder(HttpMethod::Put, "users/1")
            .body(json!({"user": {"id": "1"}}))
            .build();
        assert!(matches!(result, Err(InvalidHttpRequestError::MissingBodyType)));
    }

    #[test]
    fn test_query_string_preserves_order_and_encodes() {
        let request = HttpRequest::builder(HttpMethod::Get, "users")
            .query_param("limit", "5")
            .query_param("marker", "a b/c")
            .build()
            .unwrap();

        assert_eq!(
            request.query_string().as_deref(),
            Some("limit=5&marker=a%20b%2Fc")
        );
    }

    #[test]
    fn test_builder_with_self_service_endpoint_and_header() {
        let request = HttpRequest::builder(HttpMethod::Get, "tenants")
            .management(false)
            .header("X-Custom-Header", "custom-value")
            .build()
            .unwrap();

        assert!(!request.management);
        assert_eq!(
            request.extra_headers.unwrap().get("X-Custom-Header"),
            Some(&"custom-value".to_string())
        );
    }
}
