//! Binding correlation and cluster-role resolution
//!
//! Joins the three independently-listed RBAC collections by subject identity
//! and by role reference:
//!
//! 1. [`collect_bindings`] selects the bindings whose subject list names the
//!    principal (the subject-identity join).
//! 2. [`resolve_cluster_roles`] resolves the selected cluster bindings to
//!    role definitions (the role-reference join).
//! 3. [`principal_details`] / [`principal_role_names`] package the two views
//!    callers consume.
//!
//! Every function here is pure and total: no I/O, no mutation of inputs, no
//! error paths. The joins are deliberate nested loops — input order is kept,
//! and a binding naming the principal k times appears k times in the output.
//! At the expected scale (hundreds of bindings, a handful of subjects each)
//! this beats maintaining an index.
//!
//! # Example
//!
//! ```rust
//! use rbac_lens_core::{ClusterRole, ClusterRoleBinding, Principal, Subject};
//! use rbac_lens_core::resolver::principal_details;
//!
//! let principal = Principal::user("alice");
//! let crb = ClusterRoleBinding::new("admin-binding", "cluster-admin")
//!     .with_subject(Subject::user("alice"));
//! let roles = vec![ClusterRole::new("cluster-admin")];
//!
//! let details = principal_details(&principal, &[], &[crb], &roles);
//! assert_eq!(details.cluster_roles[0].name, "cluster-admin");
//! ```

use crate::types::{
    ClusterRole, ClusterRoleBinding, MatchedBindings, Principal, PrincipalDetails, RoleBinding,
};
use tracing::debug;


/// Select the bindings that grant access to a principal
///
/// Scans both collections; a binding is appended to the corresponding output
/// once per subject entry that matches the principal's kind and name. The
/// collector is namespace-agnostic and expects `role_bindings` to already
/// span all namespaces.
pub fn collect_bindings(
    principal: &Principal,
    role_bindings: &[RoleBinding],
    cluster_role_bindings: &[ClusterRoleBinding],
) -> MatchedBindings {
    let mut matched = MatchedBindings::default();

    for rb in role_bindings {
        for subject in &rb.subjects {
            if subject.matches(principal.kind, &principal.name) {
                matched.role_bindings.push(rb.clone());
            }
        }
    }

    for crb in cluster_role_bindings {
        for subject in &crb.subjects {
            if subject.matches(principal.kind, &principal.name) {
                matched.cluster_role_bindings.push(crb.clone());
            }
        }
    }

    debug!(
        principal = %principal.name,
        kind = ?principal.kind,
        role_bindings = matched.role_bindings.len(),
        cluster_role_bindings = matched.cluster_role_bindings.len(),
        "collected bindings"
    );

    matched
}

/// Resolve matched cluster bindings to cluster-role definitions
///
/// Appends one role per binding whose roleRef name is found in `cluster_roles`.
/// A roleRef naming a role that does not exist is skipped without error: the
/// collections are listed independently and may reflect slightly different
/// points in time. Roles referenced by several bindings appear once per
/// binding.
pub fn resolve_cluster_roles(
    matched_bindings: &[ClusterRoleBinding],
    cluster_roles: &[ClusterRole],
) -> Vec<ClusterRole> {
    let mut resolved = Vec::new();

    for crb in matched_bindings {
        for role in cluster_roles {
            if role.name == crb.role_ref.name {
                resolved.push(role.clone());
            }
        }
    }

    debug!(
        bindings = matched_bindings.len(),
        resolved = resolved.len(),
        "resolved cluster roles"
    );

    resolved
}

/// Assemble the full resolved view for a principal
///
/// Composes [`collect_bindings`] and [`resolve_cluster_roles`] into one
/// record. Only ClusterRoleBindings are resolved to role objects; RoleBinding
/// roleRefs stay unresolved in this view. An unknown principal yields a
/// record with three empty sequences.
pub fn principal_details(
    principal: &Principal,
    role_bindings: &[RoleBinding],
    cluster_role_bindings: &[ClusterRoleBinding],
    cluster_roles: &[ClusterRole],
) -> PrincipalDetails {
    let matched = collect_bindings(principal, role_bindings, cluster_role_bindings);
    let resolved = resolve_cluster_roles(&matched.cluster_role_bindings, cluster_roles);

    PrincipalDetails {
        principal: principal.clone(),
        role_bindings: matched.role_bindings,
        cluster_role_bindings: matched.cluster_role_bindings,
        cluster_roles: resolved,
    }
}

/// Flat list of role-reference names granted to a principal
///
/// Names from matched RoleBindings come first, then matched
/// ClusterRoleBindings, in input order. Role- and ClusterRole-kind references
/// are merged into one list without distinction, and nothing is resolved to
/// a role body.
pub fn principal_role_names(
    principal: &Principal,
    role_bindings: &[RoleBinding],
    cluster_role_bindings: &[ClusterRoleBinding],
) -> Vec<String> {
    let matched = collect_bindings(principal, role_bindings, cluster_role_bindings);

    let mut names = Vec::with_capacity(
        matched.role_bindings.len() + matched.cluster_role_bindings.len(),
    );
    names.extend(matched.role_bindings.iter().map(|rb| rb.role_ref.name.clone()));
    names.extend(
        matched
            .cluster_role_bindings
            .iter()
            .map(|crb| crb.role_ref.name.clone()),
    );

    names
}
