//! Authentication for team and admin endpoints.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::{AppState, AuthenticatedUser};

/// Admin token from config, injected as middleware state.
#[derive(Clone)]
pub struct AdminToken(pub Arc<String>);

/// Middleware that requires the admin token in the Authorization header.
///
/// Expected header format: `Authorization: Bearer <admin_token>`
pub async fn require_admin(
    State(admin_token): State<AdminToken>,
    request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match auth_header {
        Some(auth) if auth.starts_with("Bearer ") => {
            let token = auth.trim_start_matches("Bearer ").trim();
            if token == admin_token.0.as_str() {
                next.run(request).await
            } else {
                tracing::warn!("Rejected admin request with invalid token");
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "error": "Invalid admin token",
                        "hint": "Check INTEROP_ADMIN_TOKEN environment variable"
                    })),
                )
                    .into_response()
            }
        }
        Some(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Invalid Authorization header format",
                "expected": "Bearer <token>"
            })),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Authorization required",
                "hint": "Add header: Authorization: Bearer <admin_token>"
            })),
        )
            .into_response(),
    }
}

/// Extract a team session token from headers.
/// Accepts `Authorization: Bearer <token>` or `X-Session-Token: <token>`.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|text| text.strip_prefix("Bearer "));
    let explicit = headers
        .get("X-Session-Token")
        .and_then(|value| value.to_str().ok());

    bearer
        .into_iter()
        .chain(explicit)
        .map(str::trim)
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

fn forbidden(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::FORBIDDEN, Json(json!({ "error": message })))
}

/// Team authentication. A missing or unknown token is rejected with 403.
///
/// Handlers that must run their own checks before rejecting take
/// `Option<AuthenticatedUser>` instead.
#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers)
            .ok_or_else(|| forbidden("Authorization required"))?;
        state
            .user_for_token(&token)
            .ok_or_else(|| forbidden("Unknown session token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_wins_over_custom_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert("X-Session-Token", HeaderValue::from_static("def"));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn custom_header_is_a_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        headers.insert("X-Session-Token", HeaderValue::from_static(" def "));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("def"));
    }

    #[test]
    fn no_token_without_headers() {
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
    }
}
