//! `stockroom-store` — in-memory user and product stores.
//!
//! These are the external collaborators of the auth core: the user store
//! implements `stockroom_auth::UserLookup`, the product store backs the
//! guarded CRUD routes. Intended for dev/tests; not optimized for
//! performance.

pub mod products;
pub mod seed;
pub mod users;

pub use products::{InMemoryProductStore, Product, ProductDraft, ProductError, ProductId};
pub use users::{InMemoryUserStore, NewUser, UserStoreError};
