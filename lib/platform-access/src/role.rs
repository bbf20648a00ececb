//! Role types for training-hub access control.
//!
//! Roles arrive as plain strings from the identity endpoint (`role` or
//! `roles[]`) or from the stored auth record. Only `admin` grants
//! administrative capabilities; role names are compared exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A role claimed by an SSO identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Regular user: can browse and register for trainings.
    User,
    /// Administrator: can create, edit and delete trainings.
    Admin,
    /// Any other role name the identity provider sends.
    Other(String),
}

impl Role {
    /// Returns true if this role has admin privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        match name {
            "user" => Self::User,
            "admin" => Self::Admin,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The roles held by one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet {
    roles: Vec<Role>,
}

impl RoleSet {
    /// Creates an empty role set.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a role set from a list of role names.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            roles: names.iter().map(|n| Role::from(n.as_ref())).collect(),
        }
    }

    /// Creates a role set from a single optional role name.
    ///
    /// A missing or empty name gives an empty set.
    #[must_use]
    pub fn single(name: Option<&str>) -> Self {
        match name {
            Some(name) if !name.is_empty() => Self {
                roles: vec![Role::from(name)],
            },
            _ => Self::none(),
        }
    }

    /// Returns true if any role is `admin`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(Role::is_admin)
    }

    /// Returns the roles as a slice.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns the wire names of the roles, in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.as_str().to_string()).collect()
    }
}
