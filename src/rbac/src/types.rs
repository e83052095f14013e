//! Core RBAC types
//!
//! Shapes follow the Kubernetes `rbac.authorization.k8s.io/v1` objects this
//! crate correlates, with camelCase JSON field names on the wire.

use serde::{Deserialize, Serialize};

/// Subject kind string for users
pub const USER_KIND: &str = "User";

/// Subject kind string for service accounts
pub const SERVICE_ACCOUNT_KIND: &str = "ServiceAccount";

/// The kind of principal being queried
///
/// One generic resolver handles both kinds; the tag selects which subject
/// entries count as a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrincipalKind {
    /// A human or external identity (subject kind "User")
    User,
    /// An in-cluster workload identity (subject kind "ServiceAccount")
    ServiceAccount,
}

impl PrincipalKind {
    /// The exact subject-kind string this principal kind matches against
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => USER_KIND,
            Self::ServiceAccount => SERVICE_ACCOUNT_KIND,
        }
    }
}

/// The principal a lookup runs for
///
/// Immutable, supplied per request; never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal kind (user or service account)
    pub kind: PrincipalKind,

    /// Principal name, compared case-sensitively against subject names
    pub name: String,
}

impl Principal {
    /// Create a principal of the given kind
    pub fn new(kind: PrincipalKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Create a user principal
    pub fn user(name: impl Into<String>) -> Self {
        Self::new(PrincipalKind::User, name)
    }

    /// Create a service-account principal
    pub fn service_account(name: impl Into<String>) -> Self {
        Self::new(PrincipalKind::ServiceAccount, name)
    }
}

/// An entry in a binding's subject list
///
/// `kind` stays a free string: subjects with unrecognized kinds are inert
/// (they never match any principal) rather than being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject kind ("User", "ServiceAccount", "Group", ...)
    pub kind: String,

    /// Subject name
    pub name: String,

    /// Namespace, set for ServiceAccount subjects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Subject {
    /// Create a subject with an arbitrary kind string
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            namespace: None,
        }
    }

    /// Create a User subject
    pub fn user(name: impl Into<String>) -> Self {
        Self::new(USER_KIND, name)
    }

    /// Create a ServiceAccount subject
    pub fn service_account(name: impl Into<String>) -> Self {
        Self::new(SERVICE_ACCOUNT_KIND, name)
    }

    /// Set the subject namespace
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Whether this subject entry refers to the given principal
    ///
    /// True iff the kind string and name both match exactly. Case-sensitive,
    /// no normalization; a malformed subject simply fails to match.
    pub fn matches(&self, kind: PrincipalKind, name: &str) -> bool {
        self.kind == kind.as_str() && self.name == name
    }
}

/// The named pointer from a binding to the role it grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    /// API group of the referenced role
    #[serde(default)]
    pub api_group: String,

    /// Referenced role kind ("Role" or "ClusterRole")
    pub kind: String,

    /// Referenced role name
    pub name: String,
}

impl RoleRef {
    /// Reference a ClusterRole by name
    pub fn cluster_role(name: impl Into<String>) -> Self {
        Self {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: "ClusterRole".to_string(),
            name: name.into(),
        }
    }

    /// Reference a namespaced Role by name
    pub fn role(name: impl Into<String>) -> Self {
        Self {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: "Role".to_string(),
            name: name.into(),
        }
    }
}

/// A namespace-scoped grant linking subjects to a role reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    /// Binding name
    pub name: String,

    /// Namespace the binding lives in
    pub namespace: String,

    /// Subjects granted access by this binding
    #[serde(default)]
    pub subjects: Vec<Subject>,

    /// The role this binding grants
    pub role_ref: RoleRef,
}

impl RoleBinding {
    /// Create a binding referencing a ClusterRole, with no subjects yet
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        role_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            subjects: Vec::new(),
            role_ref: RoleRef::cluster_role(role_name),
        }
    }

    /// Append a subject
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }
}

/// A cluster-scoped grant linking subjects to a role reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoleBinding {
    /// Binding name
    pub name: String,

    /// Subjects granted access by this binding
    #[serde(default)]
    pub subjects: Vec<Subject>,

    /// The role this binding grants
    pub role_ref: RoleRef,
}

impl ClusterRoleBinding {
    /// Create a binding referencing a ClusterRole, with no subjects yet
    pub fn new(name: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subjects: Vec::new(),
            role_ref: RoleRef::cluster_role(role_name),
        }
    }

    /// Append a subject
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }
}

/// A single rule inside a role body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// Allowed verbs ("get", "list", "*")
    #[serde(default)]
    pub verbs: Vec<String>,

    /// API groups the rule applies to
    #[serde(default)]
    pub api_groups: Vec<String>,

    /// Resource types the rule applies to
    #[serde(default)]
    pub resources: Vec<String>,

    /// Specific resource names, empty meaning all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_names: Vec<String>,
}

/// A cluster-scoped role definition, the resolution target of a roleRef
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRole {
    /// Role name, the identity roleRefs resolve against
    pub name: String,

    /// The role body
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl ClusterRole {
    /// Create a role with an empty body
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule
    pub fn with_rule(mut self, rule: PolicyRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Bindings selected for a principal, split by scope
///
/// Both sequences keep input order and preserve duplicate matches: a binding
/// listing the principal as subject k times appears k times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedBindings {
    /// Matched namespaced bindings
    pub role_bindings: Vec<RoleBinding>,

    /// Matched cluster-scoped bindings
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,
}

/// The full resolved view for one principal
///
/// All three sequences are ordered and empty (never absent) when nothing
/// matches. Only ClusterRoleBindings contribute to `cluster_roles`;
/// RoleBinding roleRefs are never resolved to role objects here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalDetails {
    /// The principal the lookup ran for, echoed back verbatim
    pub principal: Principal,

    /// Namespaced bindings naming the principal
    pub role_bindings: Vec<RoleBinding>,

    /// Cluster-scoped bindings naming the principal
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,

    /// Cluster roles the matched cluster bindings resolve to, one entry per
    /// matching binding
    pub cluster_roles: Vec<ClusterRole>,
}
