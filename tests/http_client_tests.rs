//! Integration tests for the HTTP transport.
//!
//! These tests run [`HttpClient`] and a full [`IdentityClient`] against a
//! local mock server and verify endpoint selection, headers, body parsing and
//! error mapping.

use attestation_client::clients::{HttpClient, HttpRequest, Transport};
use attestation_client::rest::resources::ListParams;
use attestation_client::{
    AuthToken, ClientConfig, EndpointUrl, HttpError, HttpMethod, IdentityClient, ResourceError,
    Session,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a config with separate administrative and self-service bases on
/// the same mock server.
fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .management_url(EndpointUrl::new(format!("{}/admin/v2.0", server.uri())).unwrap())
        .public_url(EndpointUrl::new(format!("{}/public/v2.0", server.uri())).unwrap())
        .user_agent_prefix("attestd/1.0")
        .build()
        .unwrap()
}

fn session() -> Session {
    Session::new(
        Some(AuthToken::new("secret-token").unwrap()),
        Some("u-me".into()),
        None,
    )
}

// ============================================================================
// Transport
// ============================================================================

#[tokio::test]
async fn test_request_carries_token_and_targets_management_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/v2.0/users"))
        .and(header("X-Auth-Token", "secret-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(HttpClient::new(&session(), &config_for(&server)));
    let request = HttpRequest::builder(HttpMethod::Get, "users").build().unwrap();

    let response = assert_ok!(client.send(request).await);

    assert_eq!(response.code, 200);
    assert_eq!(response.body, json!({"users": []}));
}

#[tokio::test]
async fn test_self_service_request_targets_public_url() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/public/v2.0/OS-KSCRUD/users/u-me"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"user": {"password": "new", "original_password": "old"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": {"token": {"id": "t-2"}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(IdentityClient::new(&session(), &config_for(&server)));

    let access = assert_ok!(client.attestations().update_own_password("old", "new").await);

    assert_eq!(access.get("token"), Some(&json!({"id": "t-2"})));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/v2.0/users/u-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = assert_ok!(IdentityClient::new(&session(), &config_for(&server)));

    let result = assert_ok!(client.attestations().delete("u-1").await);

    assert_eq!(result, serde_json::Value::Null);
}

#[tokio::test]
async fn test_malformed_success_body_is_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/v2.0/attestation/k-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = assert_ok!(IdentityClient::new(&session(), &config_for(&server)));

    let error = assert_err!(client.attestations().get("k-1").await);

    assert!(matches!(
        error,
        ResourceError::Http(HttpError::InvalidBody { code: 200, .. })
    ));
}

#[tokio::test]
async fn test_error_status_maps_to_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/v2.0/attestation/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-openstack-request-id", "req-abc")
                .set_body_json(json!({
                    "error": {"message": "Could not find key: missing", "code": 404, "title": "Not Found"}
                })),
        )
        .mount(&server)
        .await;

    let client = assert_ok!(IdentityClient::new(&session(), &config_for(&server)));

    let error = assert_err!(client.attestations().get("missing").await);

    assert_eq!(error.status(), Some(404));
    assert_eq!(error.request_id(), Some("req-abc"));
    assert_eq!(error.to_string(), "HTTP 404: Could not find key: missing");
}

#[tokio::test]
async fn test_non_json_error_body_becomes_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/v2.0/users"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = assert_ok!(HttpClient::new(&session(), &config_for(&server)));
    let request = HttpRequest::builder(HttpMethod::Get, "users").build().unwrap();

    let error = assert_err!(client.send(request).await);

    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 502);
            assert_eq!(e.message, "Bad Gateway");
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}

// ============================================================================
// End to End
// ============================================================================

#[tokio::test]
async fn test_tenant_listing_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/v2.0/tenants/t-1/users"))
        .and(query_param("limit", "5"))
        .and(query_param("marker", "u-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "u-4", "name": "dave"}, {"id": "u-5", "name": "erin"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(IdentityClient::new(&session(), &config_for(&server)));
    let params = ListParams::new()
        .tenant("t-1")
        .limit_from_str("5")
        .unwrap()
        .marker("u-3");

    let users = assert_ok!(client.attestations().list(&params).await);

    assert_eq!(users.len(), 2);
    assert_eq!(users[1].get_str("name"), Some("erin"));
}

#[tokio::test]
async fn test_flat_listing_has_no_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/v2.0/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
        .mount(&server)
        .await;

    let client = assert_ok!(IdentityClient::new(&session(), &config_for(&server)));

    assert_ok!(client.attestations().list(&ListParams::new().limit(0)).await);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.query(), None);
}

#[tokio::test]
async fn test_role_listing_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/v2.0/OS-KSADM/roles"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roles": [{"id": "r-1"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(IdentityClient::new(&session(), &config_for(&server)));

    let roles = assert_ok!(client.roles().list().await);

    assert_eq!(roles.len(), 1);
}
