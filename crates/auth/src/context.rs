use crate::{Permission, Principal};

/// Request-scoped holder of the verified identity.
///
/// Created once per request by the authentication gate and carried as an
/// explicit value (an axum request extension), replacing any ambient
/// thread-local: concurrent requests can never observe each other's context.
/// Holds at most one identity, with the permission set derived from its role
/// at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityContext {
    Anonymous,
    Authenticated {
        principal: Principal,
        permissions: &'static [Permission],
    },
}

impl SecurityContext {
    pub fn anonymous() -> Self {
        SecurityContext::Anonymous
    }

    /// Bind a verified principal; permissions come from the static role table.
    pub fn for_principal(principal: Principal) -> Self {
        let permissions = principal.role.permissions();
        SecurityContext::Authenticated {
            principal,
            permissions,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, SecurityContext::Anonymous)
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SecurityContext::Anonymous => None,
            SecurityContext::Authenticated { principal, .. } => Some(principal),
        }
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            SecurityContext::Anonymous => &[],
            SecurityContext::Authenticated { permissions, .. } => permissions,
        }
    }
}

impl Default for SecurityContext {
    fn default() -> Self {
        SecurityContext::Anonymous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrincipalId, Role};

    fn principal(role: Role) -> Principal {
        Principal {
            id: PrincipalId::new(),
            username: "usuario".to_string(),
            email: "usuario@tecsup.edu.pe".to_string(),
            password_hash: String::new(),
            first_name: "Usuario".to_string(),
            last_name: "Prueba".to_string(),
            role,
            active: true,
        }
    }

    #[test]
    fn anonymous_grants_nothing() {
        let ctx = SecurityContext::anonymous();
        assert!(ctx.is_anonymous());
        assert!(ctx.principal().is_none());
        assert!(ctx.permissions().is_empty());
    }

    #[test]
    fn binding_derives_permissions_from_role() {
        let ctx = SecurityContext::for_principal(principal(Role::User));
        assert!(!ctx.is_anonymous());
        assert_eq!(ctx.permissions(), Role::User.permissions());
        assert_eq!(ctx.principal().unwrap().username, "usuario");
    }
}
