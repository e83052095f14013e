//! Request handlers and router
//!
//! Each RBAC endpoint follows the same pipeline: validate the query
//! parameter, run the permission check with the caller's explicit identity,
//! list the collections through the cluster client, hand the snapshot to the
//! resolution core, and serialize the result.

use crate::auth::{
    Identity, PermissionChecker, VIEW_SERVICEACCOUNT_DETAILS, VIEW_USER_DETAILS, VIEW_USER_ROLES,
};
use crate::client::ClusterClient;
use crate::error::ApiError;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use rbac_lens_core::{
    principal_details, principal_role_names, ClusterRole, ClusterRoleBinding, Principal,
    RoleBinding,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Cluster listing collaborator
    pub client: Arc<dyn ClusterClient>,
    /// Permission check collaborator
    pub permissions: Arc<dyn PermissionChecker>,
    /// Server start time, for the health endpoint
    pub start_time: Instant,
}

impl AppState {
    /// Create application state over the given collaborators
    pub fn new(client: Arc<dyn ClusterClient>, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            client,
            permissions,
            start_time: Instant::now(),
        }
    }
}

/// Query parameters for user endpoints
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Name of the user being inspected
    #[serde(rename = "userName", default)]
    pub user_name: String,
}

/// Query parameters for the service account endpoint
#[derive(Debug, Deserialize)]
pub struct ServiceAccountQuery {
    /// Name of the service account being inspected
    #[serde(rename = "serviceAccountName", default)]
    pub service_account_name: String,
}

/// Detailed RBAC view for a user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    /// The user the lookup ran for
    pub user_name: String,
    /// Namespaced bindings naming the user
    pub role_bindings: Vec<RoleBinding>,
    /// Cluster bindings naming the user
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,
    /// Cluster roles the cluster bindings resolve to
    pub cluster_roles: Vec<ClusterRole>,
}

/// Detailed RBAC view for a service account
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountDetailsResponse {
    /// The service account the lookup ran for
    pub service_account_name: String,
    /// Namespaced bindings naming the service account
    pub role_bindings: Vec<RoleBinding>,
    /// Cluster bindings naming the service account
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,
    /// Cluster roles the cluster bindings resolve to
    pub cluster_roles: Vec<ClusterRole>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" when the server responds
    pub status: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}

fn check_permission(
    state: &AppState,
    identity: &Identity,
    permission: &'static str,
    action: &'static str,
) -> Result<(), ApiError> {
    if identity.is_admin || state.permissions.has_permission(&identity.username, permission) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(action))
    }
}

/// GET /v1/rbac/users/details?userName=
pub async fn user_details(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserDetailsResponse>, ApiError> {
    check_permission(&state, &identity, VIEW_USER_DETAILS, "view user details")?;

    if query.user_name.is_empty() {
        return Err(ApiError::MissingParameter("userName"));
    }

    let role_bindings = state.client.list_role_bindings().await?;
    let cluster_role_bindings = state.client.list_cluster_role_bindings().await?;
    let cluster_roles = state.client.list_cluster_roles().await?;

    let principal = Principal::user(&query.user_name);
    let details = principal_details(
        &principal,
        &role_bindings,
        &cluster_role_bindings,
        &cluster_roles,
    );

    info!(
        user = %query.user_name,
        role_bindings = details.role_bindings.len(),
        cluster_role_bindings = details.cluster_role_bindings.len(),
        cluster_roles = details.cluster_roles.len(),
        "resolved user details"
    );

    Ok(Json(UserDetailsResponse {
        user_name: details.principal.name,
        role_bindings: details.role_bindings,
        cluster_role_bindings: details.cluster_role_bindings,
        cluster_roles: details.cluster_roles,
    }))
}

/// GET /v1/rbac/serviceaccounts/details?serviceAccountName=
pub async fn service_account_details(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<ServiceAccountQuery>,
) -> Result<Json<ServiceAccountDetailsResponse>, ApiError> {
    check_permission(
        &state,
        &identity,
        VIEW_SERVICEACCOUNT_DETAILS,
        "view service account details",
    )?;

    if query.service_account_name.is_empty() {
        return Err(ApiError::MissingParameter("serviceAccountName"));
    }

    let role_bindings = state.client.list_role_bindings().await?;
    let cluster_role_bindings = state.client.list_cluster_role_bindings().await?;
    let cluster_roles = state.client.list_cluster_roles().await?;

    let principal = Principal::service_account(&query.service_account_name);
    let details = principal_details(
        &principal,
        &role_bindings,
        &cluster_role_bindings,
        &cluster_roles,
    );

    info!(
        service_account = %query.service_account_name,
        role_bindings = details.role_bindings.len(),
        cluster_role_bindings = details.cluster_role_bindings.len(),
        cluster_roles = details.cluster_roles.len(),
        "resolved service account details"
    );

    Ok(Json(ServiceAccountDetailsResponse {
        service_account_name: details.principal.name,
        role_bindings: details.role_bindings,
        cluster_role_bindings: details.cluster_role_bindings,
        cluster_roles: details.cluster_roles,
    }))
}

/// GET /v1/rbac/users/roles?userName=
pub async fn user_roles(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    check_permission(&state, &identity, VIEW_USER_ROLES, "view user roles")?;

    if query.user_name.is_empty() {
        return Err(ApiError::MissingParameter("userName"));
    }

    let role_bindings = state.client.list_role_bindings().await?;
    let cluster_role_bindings = state.client.list_cluster_role_bindings().await?;

    let principal = Principal::user(&query.user_name);
    let roles = principal_role_names(&principal, &role_bindings, &cluster_role_bindings);

    info!(user = %query.user_name, roles = roles.len(), "resolved user roles");

    Ok(Json(roles))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: crate::VERSION.to_string(),
    })
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/rbac/users/details", get(user_details))
        .route("/v1/rbac/users/roles", get(user_roles))
        .route("/v1/rbac/serviceaccounts/details", get(service_account_details))
        .route("/health", get(health))
        .with_state(state)
}
