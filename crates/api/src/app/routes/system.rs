use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use stockroom_auth::SecurityContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Echo of the request's security context.
pub async fn whoami(Extension(ctx): Extension<SecurityContext>) -> impl IntoResponse {
    match ctx.principal() {
        Some(principal) => Json(serde_json::json!({
            "anonymous": false,
            "username": principal.username,
            "role": principal.role,
            "permissions": ctx.permissions(),
        })),
        None => Json(serde_json::json!({ "anonymous": true })),
    }
}
