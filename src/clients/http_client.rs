//! reqwest-backed transport for the identity service.
//!
//! This module provides the [`HttpClient`] type, the production
//! [`Transport`] implementation.

use std::collections::HashMap;

use crate::auth::Session;
use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::Transport;
use crate::config::{ClientConfig, EndpointUrl};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the identity service.
///
/// The client handles:
/// - Selecting the administrative or self-service base URL per request
/// - Default headers including User-Agent and `X-Auth-Token`
/// - JSON body parsing and error mapping
///
/// It never retries: a failed request is reported to the caller as-is.
///
/// # Example
///
/// ```rust,ignore
/// use attestation_client::{AuthToken, ClientConfig, EndpointUrl, Session};
/// use attestation_client::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
///
/// let config = ClientConfig::builder()
///     .management_url(EndpointUrl::new("https://identity.example.com:35357/v2.0")?)
///     .build()?;
/// let session = Session::new(Some(AuthToken::new("token")?), None, None);
///
/// let client = HttpClient::new(&session, &config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "users").build()?;
/// let response = client.send(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    management_url: EndpointUrl,
    public_url: EndpointUrl,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given session.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(session: &Session, config: &ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}attestation-client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(token) = &session.token {
            default_headers.insert("X-Auth-Token".to_string(), token.as_ref().to_string());
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            management_url: config.management_url().clone(),
            public_url: config.public_url().clone(),
            default_headers,
        })
    }

    /// Returns the administrative base URL.
    #[must_use]
    pub const fn management_url(&self) -> &EndpointUrl {
        &self.management_url
    }

    /// Returns the self-service base URL.
    #[must_use]
    pub const fn public_url(&self) -> &EndpointUrl {
        &self.public_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL a request will be sent to, without query.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let base = if request.management {
            &self.management_url
        } else {
            &self.public_url
        };
        base.join(&request.path)
    }

    /// Sends an HTTP request to the identity service.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - A success response body is not JSON (`InvalidBody`)
    /// - A non-2xx response is received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            management = request.management,
            "Sending identity service request"
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        let is_success = (200..300).contains(&code);

        let body = if body_text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(&body_text) {
                Ok(value) => value,
                Err(source) if is_success => return Err(HttpError::InvalidBody { code, source }),
                // Error pages are often HTML; keep the text for the message
                Err(_) => serde_json::Value::String(body_text),
            }
        };

        let response = HttpResponse::new(code, res_headers, body);
        if response.is_ok() {
            return Ok(response);
        }

        tracing::debug!(
            code,
            path = %request.path,
            request_id = ?response.request_id(),
            "Identity service request failed"
        );

        Err(HttpError::Response(HttpResponseError {
            code,
            message: response.error_message(),
            error_reference: response.request_id().map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthToken;

    fn create_test_config() -> ClientConfig {
        ClientConfig::builder()
            .management_url(EndpointUrl::new("https://identity.example.com:35357/v2.0").unwrap())
            .public_url(EndpointUrl::new("https://identity.example.com:5000/v2.0").unwrap())
            .build()
            .unwrap()
    }

    fn create_test_session() -> Session {
        Session::new(Some(AuthToken::new("test-token").unwrap()), None, None)
    }

    #[test]
    fn test_client_construction_with_session() {
        let client = HttpClient::new(&create_test_session(), &create_test_config()).unwrap();

        assert_eq!(
            client.management_url().as_ref(),
            "https://identity.example.com:35357/v2.0"
        );
        assert_eq!(
            client.public_url().as_ref(),
            "https://identity.example.com:5000/v2.0"
        );
    }

    #[test]
    fn test_auth_token_header_injection() {
        let client = HttpClient::new(&create_test_session(), &create_test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("X-Auth-Token"),
            Some(&"test-token".to_string())
        );
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_no_auth_token_header_without_token() {
        let session = Session::new(None, None, None);
        let client = HttpClient::new(&session, &create_test_config()).unwrap();

        assert!(client.default_headers().get("X-Auth-Token").is_none());
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .management_url(EndpointUrl::new("https://identity.example.com").unwrap())
            .user_agent_prefix("attestd/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&create_test_session(), &config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("attestd/1.0 | "));
        assert!(user_agent.contains("attestation-client v"));
    }

    #[test]
    fn test_url_for_selects_endpoint() {
        let client = HttpClient::new(&create_test_session(), &create_test_config()).unwrap();

        let admin = HttpRequest::builder(HttpMethod::Get, "users").build().unwrap();
        assert_eq!(
            client.url_for(&admin),
            "https://identity.example.com:35357/v2.0/users"
        );

        let own = HttpRequest::builder(HttpMethod::Get, "/tenants")
            .management(false)
            .build()
            .unwrap();
        assert_eq!(
            client.url_for(&own),
            "https://identity.example.com:5000/v2.0/tenants"
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
