//! # RBAC Lens API
//!
//! The boundary plumbing around [`rbac_lens_core`]: everything the core
//! treats as an external collaborator lives here.
//!
//! - [`client`] — the cluster listing seam (`ClusterClient`) and the
//!   snapshot-backed implementation used by the server and tests.
//! - [`auth`] — explicit caller identity plus the permission-check
//!   collaborator consulted before the core runs.
//! - [`handlers`] — axum request handlers and router.
//! - [`error`] — the HTTP error taxonomy (the core contributes none).
//! - [`config`] — environment-driven server configuration.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;

pub use auth::{AllowAll, Identity, PermissionChecker, StaticPermissions};
pub use client::{ClientError, ClusterClient, ClusterSnapshot, SnapshotClient};
pub use config::ApiConfig;
pub use error::ApiError;
pub use handlers::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
