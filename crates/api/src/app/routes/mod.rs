use axum::{Router, routing::get};

pub mod auth;
pub mod products;
pub mod system;
pub mod users;

/// Router for the routes behind the authentication gate.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/products", products::router())
        .nest("/users", users::router())
}
