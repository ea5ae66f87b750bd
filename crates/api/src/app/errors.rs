use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_auth::{CredentialError, Permission, SecurityContext, TokenError, authorize};
use stockroom_store::{ProductError, UserStoreError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Guard for protected operations: `Ok(())` when the context holds any of
/// `required`, otherwise the rejection response. Anonymous requests get 401
/// (authentication), authenticated ones lacking the permission get 403
/// (authorization).
pub fn require_any(
    ctx: &SecurityContext,
    required: &[Permission],
) -> Result<(), axum::response::Response> {
    if authorize(ctx, required) {
        return Ok(());
    }

    if ctx.is_anonymous() {
        Err(json_error(
            StatusCode::UNAUTHORIZED,
            "authentication_required",
            "authentication required",
        ))
    } else {
        Err(json_error(
            StatusCode::FORBIDDEN,
            "permission_denied",
            "you do not have permission to perform this operation",
        ))
    }
}

/// All login failures collapse into one 401 so callers cannot tell whether
/// the identifier or the password was wrong.
pub fn login_error_to_response(err: CredentialError) -> axum::response::Response {
    tracing::info!(kind = %err, "login rejected");
    json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "invalid username or password",
    )
}

/// Token-inspection endpoints report failures as 400 with a distinct code,
/// never message-text-only.
pub fn token_error_to_response(err: TokenError) -> axum::response::Response {
    match err {
        TokenError::MalformedToken => {
            json_error(StatusCode::BAD_REQUEST, "malformed_token", "malformed token")
        }
        TokenError::SignatureMismatch => json_error(
            StatusCode::BAD_REQUEST,
            "signature_mismatch",
            "token signature mismatch",
        ),
        TokenError::ExpiredToken => {
            json_error(StatusCode::BAD_REQUEST, "expired_token", "token has expired")
        }
        TokenError::Encoding(e) => {
            tracing::error!(error = %e, "token encoding failed");
            internal_error()
        }
    }
}

pub fn user_store_error_to_response(err: UserStoreError) -> axum::response::Response {
    match err {
        UserStoreError::UsernameTaken => {
            json_error(StatusCode::BAD_REQUEST, "username_taken", "username already exists")
        }
        UserStoreError::EmailTaken => json_error(
            StatusCode::BAD_REQUEST,
            "email_taken",
            "email is already registered",
        ),
        UserStoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        UserStoreError::Password(e) => {
            tracing::error!(error = %e, "password hashing failed");
            internal_error()
        }
        UserStoreError::Store(msg) => {
            tracing::error!(error = %msg, "user store failed");
            internal_error()
        }
    }
}

pub fn product_error_to_response(err: ProductError) -> axum::response::Response {
    match err {
        ProductError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        ProductError::Store(msg) => {
            tracing::error!(error = %msg, "product store failed");
            internal_error()
        }
    }
}

/// Stable generic 500: details go to the logs, never to the client.
pub fn internal_error() -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "internal server error",
    )
}
