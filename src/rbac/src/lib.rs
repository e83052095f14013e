//! # RBAC Lens Core
//!
//! Answers one question for a cluster-access-control deployment: *what can
//! principal P do, and through which bindings?* Given a principal (a user
//! or a service account) and full listings of the cluster's RoleBindings,
//! ClusterRoleBindings, and ClusterRoles, it computes the bindings that
//! grant access to that principal and the cluster-role definitions those
//! bindings resolve to.
//!
//! ## Design
//!
//! - **Pure and total** — no I/O, no locks, no error paths. Listing the
//!   collections (and authenticating the caller) is the job of the layer
//!   above; this crate only correlates already-fetched snapshots.
//! - **Duplicate-preserving** — a binding that names the same principal as
//!   subject twice appears twice in the results, mirroring the nested-loop
//!   join over subject lists.
//! - **Order-preserving** — every output sequence keeps the iteration order
//!   of its input collection.
//!
//! ## Example
//!
//! ```rust
//! use rbac_lens_core::{Principal, RoleBinding, Subject, resolver::principal_role_names};
//!
//! let principal = Principal::user("alice");
//! let rb = RoleBinding::new("edit-binding", "team-a", "edit")
//!     .with_subject(Subject::user("alice"));
//!
//! let roles = principal_role_names(&principal, &[rb], &[]);
//! assert_eq!(roles, vec!["edit".to_string()]);
//! ```

pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use resolver::{
    collect_bindings, principal_details, principal_role_names, resolve_cluster_roles,
};
pub use types::{
    ClusterRole, ClusterRoleBinding, MatchedBindings, PolicyRule, Principal, PrincipalDetails,
    PrincipalKind, RoleBinding, RoleRef, Subject,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
