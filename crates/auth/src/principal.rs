use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::Role;

/// Identity of a stored principal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PrincipalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Identity record resolved from the user store.
///
/// Owned by the store; this crate only reads it. `password_hash` is a PHC
/// string (see [`crate::password`]) and must never reach a wire response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub active: bool,
}

impl Principal {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Failure inside the user-store collaborator (lock poisoned, backend down).
///
/// Callers in this crate collapse it into `UnknownIdentity`; the detail stays
/// available for logs.
#[derive(Debug, Error)]
#[error("user lookup failed: {0}")]
pub struct LookupError(pub String);

/// External collaborator that resolves principals.
///
/// The one blocking call on the request path; implementations are expected to
/// honor the request's own timeout. No retries happen on this side.
pub trait UserLookup: Send + Sync {
    fn find_by_username(&self, username: &str) -> Result<Option<Principal>, LookupError>;

    fn find_by_email(&self, email: &str) -> Result<Option<Principal>, LookupError>;
}
