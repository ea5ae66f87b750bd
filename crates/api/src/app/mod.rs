//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: store/codec wiring shared by the handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use stockroom_auth::{CredentialVerifier, TokenCodec, UserLookup};
use stockroom_store::{InMemoryProductStore, InMemoryUserStore, seed};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: &str, expiration_ms: i64) -> anyhow::Result<Router> {
    let users = Arc::new(InMemoryUserStore::new());
    let products = Arc::new(InMemoryProductStore::new());
    seed::seed(&users, &products)?;

    let codec = Arc::new(TokenCodec::new(jwt_secret.as_bytes(), expiration_ms));
    let lookup: Arc<dyn UserLookup> = users.clone();

    let services = Arc::new(services::AppServices {
        codec: codec.clone(),
        verifier: CredentialVerifier::new(lookup.clone()),
        users,
        products,
    });

    let auth_state = middleware::AuthState {
        codec,
        users: lookup,
    };

    // The gate runs on every protected route and only binds identity;
    // each handler decides whether anonymity is acceptable.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/auth", routes::auth::router())
        .nest("/api", protected)
        .layer(ServiceBuilder::new().layer(Extension(services))))
}
