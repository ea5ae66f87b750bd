use std::sync::Arc;

use stockroom_auth::{CredentialVerifier, TokenCodec};
use stockroom_store::{InMemoryProductStore, InMemoryUserStore};

/// Shared service bundle handed to handlers as an `Extension`.
///
/// Everything here is immutable after startup or internally synchronized, so
/// one `Arc` serves all concurrent requests.
pub struct AppServices {
    pub codec: Arc<TokenCodec>,
    pub verifier: CredentialVerifier,
    pub users: Arc<InMemoryUserStore>,
    pub products: Arc<InMemoryProductStore>,
}
