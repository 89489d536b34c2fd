//! Authenticated user identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated principal behind the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<UserRole>,
}

impl UserIdentity {
    /// Check whether the user holds the given role.
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.iter().any(|r| r.name == role)
    }
}

/// A role assigned to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub id: String,
    pub name: RoleName,
}

/// Role names recognized by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    Admin,
    Manager,
    Staff,
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleName::Admin => write!(f, "ADMIN"),
            RoleName::Manager => write!(f, "MANAGER"),
            RoleName::Staff => write!(f, "STAFF"),
        }
    }
}
