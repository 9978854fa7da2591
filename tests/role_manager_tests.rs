//! Integration tests for roles and role grants.

mod common;

use attestation_client::HttpMethod;
use common::scripted_client;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_grant_and_revoke_round_trip() {
    let client = scripted_client(None);
    client
        .transport()
        .ok(json!({"user": {"id": "u-1", "name": "alice"}}))
        .ok(json!({"role": {"id": "r-1", "name": "admin"}}))
        .ok(json!({"role": {"id": "r-1", "name": "admin"}}))
        .ok(json!({"roles": [{"id": "r-1", "name": "admin"}]}));

    let user = assert_ok!(
        client
            .attestations()
            .update_enabled("u-1", true)
            .await
    );
    let admin = assert_ok!(client.roles().get("r-1").await);
    assert_ok!(client.roles().add_user_role(&user, &admin, None).await);
    let granted = assert_ok!(client.attestations().list_roles(&user, None).await);
    assert_ok!(client.roles().remove_user_role(&user, &admin, None).await);

    assert_eq!(granted, vec![admin.clone()]);
    let sent = client.transport().sent();
    assert_eq!(sent[2].http_method, HttpMethod::Put);
    assert_eq!(sent[2].path, "users/u-1/roles/OS-KSADM/r-1");
    assert_eq!(sent[3].path, "users/u-1/roles");
    assert_eq!(sent[4].http_method, HttpMethod::Delete);
    assert_eq!(sent[4].path, "users/u-1/roles/OS-KSADM/r-1");
}

#[tokio::test]
async fn test_tenant_scoped_grants() {
    let client = scripted_client(None);
    client
        .transport()
        .ok(json!({"role": {"id": "r-2"}}))
        .ok(json!({"roles": []}));

    assert_ok!(
        client
            .roles()
            .add_user_role("u-1", "r-2", Some(&"t-9"))
            .await
    );
    assert_ok!(client.roles().roles_for_user("u-1", Some(&"t-9")).await);
    assert_ok!(
        client
            .roles()
            .remove_user_role("u-1", "r-2", Some(&"t-9"))
            .await
    );

    let paths: Vec<_> = client.transport().sent().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "tenants/t-9/users/u-1/roles/OS-KSADM/r-2",
            "tenants/t-9/users/u-1/roles",
            "tenants/t-9/users/u-1/roles/OS-KSADM/r-2",
        ]
    );
}

#[tokio::test]
async fn test_role_without_id_cannot_be_granted() {
    let client = scripted_client(None);
    client.transport().ok(json!({"role": {"name": "nameless"}}));

    let nameless = assert_ok!(client.roles().create("nameless").await);
    assert_err!(client.roles().add_user_role("u-1", &nameless, None).await);

    assert_eq!(client.transport().sent().len(), 1);
}
