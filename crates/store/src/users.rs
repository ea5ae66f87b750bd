use std::sync::RwLock;

use thiserror::Error;

use stockroom_auth::{
    LookupError, PasswordError, Principal, PrincipalId, Role, UserLookup, password,
};

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("username already exists")]
    UsernameTaken,

    #[error("email is already registered")]
    EmailTaken,

    #[error("user not found")]
    NotFound,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("user store failed: {0}")]
    Store(String),
}

/// Registration input. The plaintext password is hashed on insert and never
/// stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// In-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<Principal>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user, enforcing unique username and email.
    pub fn insert(&self, new_user: NewUser) -> Result<Principal, UserStoreError> {
        let password_hash = password::hash_password(&new_user.password)?;

        let mut users = self
            .users
            .write()
            .map_err(|_| UserStoreError::Store("lock poisoned".to_string()))?;

        if users.iter().any(|u| u.username == new_user.username) {
            return Err(UserStoreError::UsernameTaken);
        }
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(UserStoreError::EmailTaken);
        }

        let principal = Principal {
            id: PrincipalId::new(),
            username: new_user.username,
            email: new_user.email,
            password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
            active: true,
        };

        users.push(principal.clone());
        Ok(principal)
    }

    pub fn all(&self) -> Result<Vec<Principal>, UserStoreError> {
        Ok(self
            .users
            .read()
            .map_err(|_| UserStoreError::Store("lock poisoned".to_string()))?
            .clone())
    }

    pub fn count(&self) -> Result<usize, UserStoreError> {
        Ok(self
            .users
            .read()
            .map_err(|_| UserStoreError::Store("lock poisoned".to_string()))?
            .len())
    }

    /// Soft delete: the principal stays but can no longer authenticate.
    pub fn deactivate(&self, id: PrincipalId) -> Result<(), UserStoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserStoreError::Store("lock poisoned".to_string()))?;

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserStoreError::NotFound)?;

        user.active = false;
        Ok(())
    }
}

impl UserLookup for InMemoryUserStore {
    fn find_by_username(&self, username: &str) -> Result<Option<Principal>, LookupError> {
        let users = self
            .users
            .read()
            .map_err(|_| LookupError("lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Principal>, LookupError> {
        let users = self
            .users
            .read()
            .map_err(|_| LookupError("lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            first_name: "Test".to_string(),
            last_name: "Account".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn insert_and_lookup() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("alice", "alice@example.com")).unwrap();

        let by_name = store.find_by_username("alice").unwrap().unwrap();
        assert_eq!(by_name.email, "alice@example.com");
        assert!(by_name.active);
        // Hash, not plaintext.
        assert_ne!(by_name.password_hash, "secret123");

        let by_email = store.find_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(by_email.username, "alice");

        assert!(store.find_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_and_email_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("alice", "alice@example.com")).unwrap();

        assert!(matches!(
            store.insert(new_user("alice", "other@example.com")),
            Err(UserStoreError::UsernameTaken)
        ));
        assert!(matches!(
            store.insert(new_user("other", "alice@example.com")),
            Err(UserStoreError::EmailTaken)
        ));
    }

    #[test]
    fn deactivate_is_soft() {
        let store = InMemoryUserStore::new();
        let created = store.insert(new_user("alice", "alice@example.com")).unwrap();

        store.deactivate(created.id).unwrap();

        let found = store.find_by_username("alice").unwrap().unwrap();
        assert!(!found.active);

        assert!(matches!(
            store.deactivate(PrincipalId::new()),
            Err(UserStoreError::NotFound)
        ));
    }
}
