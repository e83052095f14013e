//! Cluster listing collaborator
//!
//! The core never talks to a cluster; it consumes collections something else
//! has already listed. [`ClusterClient`] is that something else. The server
//! and every test use [`SnapshotClient`], which serves one immutable
//! [`ClusterSnapshot`] loaded from JSON or built in memory; a deployment
//! against a live cluster would put its API client behind the same trait.

use async_trait::async_trait;
use rbac_lens_core::{ClusterRole, ClusterRoleBinding, RoleBinding};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Fetch-layer failures
///
/// Listing failures surface as a distinct category before the core is ever
/// invoked; the core itself has no error paths.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An upstream listing call failed
    #[error("upstream listing failed for {what}: {message}")]
    Upstream {
        /// Which collection was being listed
        what: &'static str,
        /// Upstream failure detail
        message: String,
    },

    /// A snapshot file could not be read or parsed
    #[error("snapshot load failed: {0}")]
    SnapshotLoad(String),
}

/// Result type for listing operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Lists the three RBAC collections the core correlates
///
/// Each call returns a complete, flat listing: role bindings across all
/// namespaces, cluster role bindings, and cluster roles. Implementations
/// decide freshness; callers treat each returned vector as an immutable
/// snapshot.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// List role bindings across all namespaces
    async fn list_role_bindings(&self) -> ClientResult<Vec<RoleBinding>>;

    /// List cluster role bindings
    async fn list_cluster_role_bindings(&self) -> ClientResult<Vec<ClusterRoleBinding>>;

    /// List cluster roles
    async fn list_cluster_roles(&self) -> ClientResult<Vec<ClusterRole>>;
}

/// One point-in-time view of a cluster's RBAC objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSnapshot {
    /// Role bindings across all namespaces
    #[serde(default)]
    pub role_bindings: Vec<RoleBinding>,

    /// Cluster role bindings
    #[serde(default)]
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,

    /// Cluster roles
    #[serde(default)]
    pub cluster_roles: Vec<ClusterRole>,
}

impl ClusterSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClientError::SnapshotLoad(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| ClientError::SnapshotLoad(format!("{}: {}", path.display(), e)))
    }
}

/// [`ClusterClient`] serving a fixed snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotClient {
    snapshot: Arc<ClusterSnapshot>,
}

impl SnapshotClient {
    /// Serve the given snapshot
    pub fn new(snapshot: ClusterSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Serve a snapshot loaded from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        Ok(Self::new(ClusterSnapshot::load(path)?))
    }
}

#[async_trait]
impl ClusterClient for SnapshotClient {
    async fn list_role_bindings(&self) -> ClientResult<Vec<RoleBinding>> {
        Ok(self.snapshot.role_bindings.clone())
    }

    async fn list_cluster_role_bindings(&self) -> ClientResult<Vec<ClusterRoleBinding>> {
        Ok(self.snapshot.cluster_role_bindings.clone())
    }

    async fn list_cluster_roles(&self) -> ClientResult<Vec<ClusterRole>> {
        Ok(self.snapshot.cluster_roles.clone())
    }
}
