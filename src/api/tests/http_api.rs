//! End-to-end HTTP tests over the router
//!
//! Drives the axum router directly with `tower::ServiceExt::oneshot` against
//! a snapshot-backed client, covering the happy path of every endpoint and
//! each failure category of the API error taxonomy.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rbac_lens_api::client::ClientResult;
use rbac_lens_api::{
    AllowAll, AppState, ClientError, ClusterClient, ClusterSnapshot, SnapshotClient,
    StaticPermissions,
};
use rbac_lens_core::{ClusterRole, ClusterRoleBinding, RoleBinding, Subject};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn sample_snapshot() -> ClusterSnapshot {
    ClusterSnapshot {
        role_bindings: vec![
            RoleBinding::new("rb-edit", "team-a", "edit").with_subject(Subject::user("alice")),
            RoleBinding::new("rb-view", "team-b", "view").with_subject(Subject::user("bob")),
            RoleBinding::new("rb-ci", "build", "builder")
                .with_subject(Subject::service_account("ci").in_namespace("build")),
        ],
        cluster_role_bindings: vec![ClusterRoleBinding::new("crb-admin", "cluster-admin")
            .with_subject(Subject::user("alice"))],
        cluster_roles: vec![ClusterRole::new("cluster-admin"), ClusterRole::new("viewer")],
    }
}

fn app_allow_all() -> axum::Router {
    let client = SnapshotClient::new(sample_snapshot());
    let state = AppState::new(Arc::new(client), Arc::new(AllowAll));
    rbac_lens_api::router(state)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// Client whose every listing call fails
struct BrokenClient;

#[async_trait]
impl ClusterClient for BrokenClient {
    async fn list_role_bindings(&self) -> ClientResult<Vec<RoleBinding>> {
        Err(ClientError::Upstream {
            what: "role bindings",
            message: "connection refused".to_string(),
        })
    }

    async fn list_cluster_role_bindings(&self) -> ClientResult<Vec<ClusterRoleBinding>> {
        Err(ClientError::Upstream {
            what: "cluster role bindings",
            message: "connection refused".to_string(),
        })
    }

    async fn list_cluster_roles(&self) -> ClientResult<Vec<ClusterRole>> {
        Err(ClientError::Upstream {
            what: "cluster roles",
            message: "connection refused".to_string(),
        })
    }
}

#[tokio::test]
async fn user_details_happy_path() {
    let (status, json) = get_json(app_allow_all(), "/v1/rbac/users/details?userName=alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["userName"], "alice");
    assert_eq!(json["roleBindings"].as_array().unwrap().len(), 1);
    assert_eq!(json["roleBindings"][0]["name"], "rb-edit");
    assert_eq!(json["clusterRoleBindings"][0]["name"], "crb-admin");
    assert_eq!(json["clusterRoles"][0]["name"], "cluster-admin");
}

#[tokio::test]
async fn user_details_unknown_user_returns_empty_sequences() {
    let (status, json) =
        get_json(app_allow_all(), "/v1/rbac/users/details?userName=mallory").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["userName"], "mallory");
    assert_eq!(json["roleBindings"], serde_json::json!([]));
    assert_eq!(json["clusterRoleBindings"], serde_json::json!([]));
    assert_eq!(json["clusterRoles"], serde_json::json!([]));
}

#[tokio::test]
async fn service_account_details_happy_path() {
    let (status, json) = get_json(
        app_allow_all(),
        "/v1/rbac/serviceaccounts/details?serviceAccountName=ci",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["serviceAccountName"], "ci");
    assert_eq!(json["roleBindings"][0]["name"], "rb-ci");
    assert_eq!(json["clusterRoleBindings"], serde_json::json!([]));
    assert_eq!(json["clusterRoles"], serde_json::json!([]));
}

#[tokio::test]
async fn user_roles_returns_flat_names() {
    let (status, json) = get_json(app_allow_all(), "/v1/rbac/users/roles?userName=alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!(["edit", "cluster-admin"]));
}

#[tokio::test]
async fn missing_user_name_is_bad_request() {
    let (status, json) = get_json(app_allow_all(), "/v1/rbac/users/details").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn missing_service_account_name_is_bad_request() {
    let (status, json) = get_json(app_allow_all(), "/v1/rbac/serviceaccounts/details").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn permission_check_gates_non_admins() {
    let client = SnapshotClient::new(sample_snapshot());
    let permissions = StaticPermissions::new().grant("auditor", "view_user_roles");
    let state = AppState::new(Arc::new(client), Arc::new(permissions));
    let app = rbac_lens_api::router(state);

    // No identity headers at all: denied.
    let (status, json) = get_json(app.clone(), "/v1/rbac/users/details?userName=alice").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "forbidden");

    // auditor holds view_user_roles but not view_user_details.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/rbac/users/details?userName=alice")
                .header("x-username", "auditor")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/rbac/users/roles?userName=alice")
                .header("x-username", "auditor")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Admin header bypasses the permission table.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/rbac/users/details?userName=alice")
                .header("x-username", "root")
                .header("x-admin", "true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let state = AppState::new(Arc::new(BrokenClient), Arc::new(AllowAll));
    let app = rbac_lens_api::router(state);

    let (status, json) = get_json(app, "/v1/rbac/users/roles?userName=alice").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "upstream_error");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("upstream listing failed"));
}

#[tokio::test]
async fn health_endpoint_reports_version() {
    let (status, json) = get_json(app_allow_all(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], rbac_lens_api::VERSION);
}
