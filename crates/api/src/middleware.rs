//! The authentication gate: runs once per request, before any handler.
//!
//! Verification failures never abort the pipeline here. The request is left
//! anonymous and continues, so the authorization decision (and its status
//! code) stays centralized in the handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use stockroom_auth::{SecurityContext, TokenCodec, UserLookup};

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<TokenCodec>,
    pub users: Arc<dyn UserLookup>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = resolve_context(&state, req.headers());
    // Exactly one context per request; handlers read it as an extension.
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

fn resolve_context(state: &AuthState, headers: &HeaderMap) -> SecurityContext {
    let Some(token) = extract_bearer(headers) else {
        return SecurityContext::anonymous();
    };

    let claims = match state.codec.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            return SecurityContext::anonymous();
        }
    };

    // Re-resolve the principal: a token may outlive the account it names.
    match state.users.find_by_username(claims.subject()) {
        Ok(Some(principal)) if principal.active => SecurityContext::for_principal(principal),
        Ok(_) => {
            tracing::debug!(subject = claims.subject(), "token subject missing or inactive");
            SecurityContext::anonymous()
        }
        Err(e) => {
            tracing::warn!(error = %e, "user lookup failed in auth gate");
            SecurityContext::anonymous()
        }
    }
}

pub(crate) fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers_with("Bearer   token  ")), Some("token"));
        assert_eq!(extract_bearer(&headers_with("Basic abc")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }
}
