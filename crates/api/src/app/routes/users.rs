//! Admin-only user management.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use stockroom_auth::{Permission, PrincipalId, SecurityContext};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/deactivate", post(deactivate_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, &[Permission::AdminRead]) {
        return resp;
    }

    match services.users.all() {
        Ok(users) => Json(
            users
                .iter()
                .map(dto::PrincipalResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::user_store_error_to_response(e),
    }
}

pub async fn deactivate_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, &[Permission::AdminDelete]) {
        return resp;
    }

    let id: PrincipalId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    match services.users.deactivate(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::user_store_error_to_response(e),
    }
}
