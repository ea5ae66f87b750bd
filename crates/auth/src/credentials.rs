use std::sync::Arc;

use thiserror::Error;

use crate::{Principal, UserLookup, password};

/// Login failure.
///
/// The boundary is expected to collapse all three variants into one generic
/// 401 message so a caller cannot probe which accounts exist.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("unknown identity")]
    UnknownIdentity,

    #[error("bad credentials")]
    BadCredentials,

    #[error("account is inactive")]
    InactiveAccount,
}

/// Validates a login attempt against stored credentials.
///
/// Resolution order is username first, then email. On success the caller
/// receives the principal and decides what to mint; no token is issued here.
pub struct CredentialVerifier {
    users: Arc<dyn UserLookup>,
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserLookup>) -> Self {
        Self { users }
    }

    pub fn authenticate(
        &self,
        identifier: &str,
        plaintext_password: &str,
    ) -> Result<Principal, CredentialError> {
        let principal = self.resolve(identifier)?;

        // Account status is checked before the hash, matching the original
        // pre-authentication order.
        if !principal.active {
            return Err(CredentialError::InactiveAccount);
        }

        password::verify_password(plaintext_password, &principal.password_hash)
            .map_err(|_| CredentialError::BadCredentials)?;

        Ok(principal)
    }

    fn resolve(&self, identifier: &str) -> Result<Principal, CredentialError> {
        let by_username = self.users.find_by_username(identifier).map_err(|e| {
            tracing::warn!(error = %e, "user lookup failed during login");
            CredentialError::UnknownIdentity
        })?;

        if let Some(principal) = by_username {
            return Ok(principal);
        }

        let by_email = self.users.find_by_email(identifier).map_err(|e| {
            tracing::warn!(error = %e, "user lookup failed during login");
            CredentialError::UnknownIdentity
        })?;

        by_email.ok_or(CredentialError::UnknownIdentity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LookupError, PrincipalId, Role};

    struct FixedLookup {
        principals: Vec<Principal>,
        fail: bool,
    }

    impl UserLookup for FixedLookup {
        fn find_by_username(&self, username: &str) -> Result<Option<Principal>, LookupError> {
            if self.fail {
                return Err(LookupError("store unavailable".to_string()));
            }
            Ok(self
                .principals
                .iter()
                .find(|p| p.username == username)
                .cloned())
        }

        fn find_by_email(&self, email: &str) -> Result<Option<Principal>, LookupError> {
            if self.fail {
                return Err(LookupError("store unavailable".to_string()));
            }
            Ok(self.principals.iter().find(|p| p.email == email).cloned())
        }
    }

    fn usuario(active: bool) -> Principal {
        Principal {
            id: PrincipalId::new(),
            username: "usuario".to_string(),
            email: "usuario@tecsup.edu.pe".to_string(),
            password_hash: password::hash_password("user123").unwrap(),
            first_name: "Usuario".to_string(),
            last_name: "Prueba".to_string(),
            role: Role::User,
            active,
        }
    }

    fn verifier(principals: Vec<Principal>, fail: bool) -> CredentialVerifier {
        CredentialVerifier::new(Arc::new(FixedLookup { principals, fail }))
    }

    #[test]
    fn authenticates_by_username() {
        let v = verifier(vec![usuario(true)], false);
        let p = v.authenticate("usuario", "user123").unwrap();
        assert_eq!(p.username, "usuario");
    }

    #[test]
    fn falls_back_to_email() {
        let v = verifier(vec![usuario(true)], false);
        let p = v.authenticate("usuario@tecsup.edu.pe", "user123").unwrap();
        assert_eq!(p.username, "usuario");
    }

    #[test]
    fn unknown_identifier() {
        let v = verifier(vec![usuario(true)], false);
        assert!(matches!(
            v.authenticate("nadie", "user123"),
            Err(CredentialError::UnknownIdentity)
        ));
    }

    #[test]
    fn wrong_password() {
        let v = verifier(vec![usuario(true)], false);
        assert!(matches!(
            v.authenticate("usuario", "wrong-password"),
            Err(CredentialError::BadCredentials)
        ));
    }

    #[test]
    fn inactive_account_rejected_before_password_check() {
        let v = verifier(vec![usuario(false)], false);
        assert!(matches!(
            v.authenticate("usuario", "user123"),
            Err(CredentialError::InactiveAccount)
        ));
        // Even a wrong password reports the account state, not the hash check.
        assert!(matches!(
            v.authenticate("usuario", "wrong"),
            Err(CredentialError::InactiveAccount)
        ));
    }

    #[test]
    fn lookup_failure_surfaces_as_unknown_identity() {
        let v = verifier(vec![usuario(true)], true);
        assert!(matches!(
            v.authenticate("usuario", "user123"),
            Err(CredentialError::UnknownIdentity)
        ));
    }
}
