//! `stockroom-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the token
//! codec, credential checks, and the role→permission policy live here, while
//! user persistence stays behind the [`UserLookup`] trait and transport
//! concerns stay in the API crate.

pub mod authorize;
pub mod claims;
pub mod context;
pub mod credentials;
pub mod password;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod token;

pub use authorize::authorize;
pub use claims::Claims;
pub use context::SecurityContext;
pub use credentials::{CredentialError, CredentialVerifier};
pub use password::{hash_password, verify_password, PasswordError};
pub use permissions::Permission;
pub use principal::{LookupError, Principal, PrincipalId, UserLookup};
pub use roles::Role;
pub use token::{TokenCodec, TokenError};
