use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};

use stockroom_auth::{Role, UserLookup};
use stockroom_store::NewUser;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::middleware::extract_bearer;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/validate", get(validate))
        .route("/me", get(me))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let principal = match services
        .verifier
        .authenticate(&body.username_or_email, &body.password)
    {
        Ok(p) => p,
        Err(e) => return errors::login_error_to_response(e),
    };

    let token = match services.codec.generate(&principal.username, HashMap::new()) {
        Ok(t) => t,
        Err(e) => return errors::token_error_to_response(e),
    };

    tracing::info!(username = %principal.username, "login succeeded");
    Json(dto::TokenResponse::new(
        token,
        &principal,
        services.codec.expiration_ms(),
    ))
    .into_response()
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    if body.password.len() < 6 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "password must be at least 6 characters",
        );
    }
    if body.username.trim().is_empty() || !body.email.contains('@') {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "username and a valid email are required",
        );
    }

    // Self-registration always lands on the USER role.
    let created = match services.users.insert(NewUser {
        username: body.username.trim().to_string(),
        email: body.email.trim().to_lowercase(),
        password: body.password,
        first_name: body.first_name.trim().to_string(),
        last_name: body.last_name.trim().to_string(),
        role: Role::User,
    }) {
        Ok(p) => p,
        Err(e) => return errors::user_store_error_to_response(e),
    };

    tracing::info!(username = %created.username, "user registered");
    Json(dto::PrincipalResponse::from(&created)).into_response()
}

/// Token inspection: answers "is this token valid", independent of any
/// resource. Failures are 400 with a distinct code.
pub async fn validate(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let Some(token) = extract_bearer(&headers) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "missing_token", "bearer token required");
    };

    match services.codec.verify(token) {
        Ok(claims) => Json(serde_json::json!({ "username": claims.subject() })).into_response(),
        Err(e) => errors::token_error_to_response(e),
    }
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let Some(token) = extract_bearer(&headers) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "missing_token", "bearer token required");
    };

    let claims = match services.codec.verify(token) {
        Ok(c) => c,
        Err(e) => return errors::token_error_to_response(e),
    };

    match services.users.find_by_username(claims.subject()) {
        Ok(Some(principal)) => Json(dto::PrincipalResponse::from(&principal)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::BAD_REQUEST,
            "unknown_identity",
            "token subject no longer exists",
        ),
        Err(e) => {
            tracing::error!(error = %e, "user lookup failed");
            errors::internal_error()
        }
    }
}
