use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role granted to a principal.
///
/// The enumeration is closed and defined once; everything a role may do is
/// derived from the `const` permission tables below, which are computed at
/// compile time and never rebuilt or mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::AdminRead,
    Permission::AdminWrite,
    Permission::AdminDelete,
    Permission::UserRead,
    Permission::UserWrite,
];

const USER_PERMISSIONS: &[Permission] = &[Permission::UserRead, Permission::UserWrite];

impl Role {
    /// Static permission set for this role. Total: every variant maps to a
    /// non-empty slice.
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Role::Admin => ADMIN_PERMISSIONS,
            Role::User => USER_PERMISSIONS,
        }
    }

    pub fn has_permission(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
