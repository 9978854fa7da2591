//! HTTP response types.

use std::collections::HashMap;

/// Header carrying the service-side request id.
pub const REQUEST_ID_HEADER: &str = "x-openstack-request-id";

/// A parsed response from the identity service.
///
/// `body` is the parsed JSON payload. An empty body parses to
/// [`serde_json::Value::Null`].
///
/// # Example
///
/// ```rust
/// use attestation_client::clients::HttpResponse;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(200, HashMap::new(), json!({"key_data": {"id": "k-1"}}));
/// assert!(response.is_ok());
/// assert_eq!(response.body["key_data"]["id"], "k-1");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the service-side request id, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    /// Extracts the human-readable error message from an error body.
    ///
    /// The service reports failures as
    /// `{"error": {"message": ..., "code": ..., "title": ...}}`. Bodies in
    /// any other shape are rendered as JSON text.
    #[must_use]
    pub fn error_message(&self) -> String {
        let error = self.body.get("error");
        let message = error
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
            .or_else(|| error.and_then(serde_json::Value::as_str));

        match message {
            Some(message) => message.to_string(),
            None => match &self.body {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            },
        }
    }
}
