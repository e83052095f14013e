//! Caller identity and permission checks
//!
//! Identity is explicit, never ambient: handlers extract it from request
//! headers and pass it to a [`PermissionChecker`] before the core runs.
//! Admins bypass the per-permission check.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

/// Header carrying the caller's username
pub const USERNAME_HEADER: &str = "x-username";

/// Header marking the caller as an admin ("true"/"1")
pub const ADMIN_HEADER: &str = "x-admin";

/// Permission required to view user details
pub const VIEW_USER_DETAILS: &str = "view_user_details";

/// Permission required to view service account details
pub const VIEW_SERVICEACCOUNT_DETAILS: &str = "view_serviceaccount_details";

/// Permission required to view user roles
pub const VIEW_USER_ROLES: &str = "view_user_roles";

/// The authenticated caller, as asserted by the layer in front of this server
///
/// An authenticating proxy or session layer is expected to set the identity
/// headers; this server only consumes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Caller username, empty when the header is absent
    pub username: String,

    /// Whether the caller is an admin
    pub is_admin: bool,
}

impl Identity {
    /// Create an identity
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(USERNAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let is_admin = parts
            .headers
            .get(ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self { username, is_admin })
    }
}

/// Decides whether a caller holds a named permission
pub trait PermissionChecker: Send + Sync {
    /// Whether `username` holds `permission`
    fn has_permission(&self, username: &str, permission: &str) -> bool;
}

/// Grants every permission to every caller
///
/// The default for local runs against a snapshot file.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionChecker for AllowAll {
    fn has_permission(&self, _username: &str, _permission: &str) -> bool {
        true
    }
}

/// Fixed username-to-permissions table
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    grants: HashMap<String, HashSet<String>>,
}

impl StaticPermissions {
    /// Empty table, denying everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a permission to a username
    pub fn grant(mut self, username: impl Into<String>, permission: impl Into<String>) -> Self {
        self.grants
            .entry(username.into())
            .or_default()
            .insert(permission.into());
        self
    }
}

impl PermissionChecker for StaticPermissions {
    fn has_permission(&self, username: &str, permission: &str) -> bool {
        self.grants
            .get(username)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }
}
