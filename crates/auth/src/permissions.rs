use serde::{Deserialize, Serialize};

/// Permission tag checked by [`crate::authorize`].
///
/// The set is closed: permissions exist only as grants of a [`crate::Role`],
/// never assigned per user. Wire form is the SCREAMING_SNAKE tag
/// (e.g. `"ADMIN_WRITE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    AdminRead,
    AdminWrite,
    AdminDelete,
    UserRead,
    UserWrite,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::AdminRead => "ADMIN_READ",
            Permission::AdminWrite => "ADMIN_WRITE",
            Permission::AdminDelete => "ADMIN_DELETE",
            Permission::UserRead => "USER_READ",
            Permission::UserWrite => "USER_WRITE",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_is_screaming_snake() {
        let json = serde_json::to_string(&Permission::AdminDelete).unwrap();
        assert_eq!(json, "\"ADMIN_DELETE\"");

        let parsed: Permission = serde_json::from_str("\"USER_READ\"").unwrap();
        assert_eq!(parsed, Permission::UserRead);
    }
}
