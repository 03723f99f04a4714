use auth::Claims;
use auth::OwnershipScope;
use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Caller identity taken from a validated access token, stored in request
/// extensions for protected handlers.
///
/// Reflects the claims at issuance. Role changes apply at the next login.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub scope: OwnershipScope,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        let scope = OwnershipScope::for_claims(&claims);
        Self {
            user_id: UserId(claims.user_id),
            username: claims.sub,
            role: claims.role,
            scope,
        }
    }
}

/// Middleware that validates the access token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers(), &state.auth_cookie.name).ok_or_else(|| {
        tracing::debug!(uri = %req.uri(), "Request without access token");
        ApiError::Unauthorized
    })?;

    let claims = state.token_validator.validate(&token).map_err(|e| {
        tracing::warn!(reason = e.reason(), "Access token rejected");
        ApiError::Unauthorized
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser::from(claims));

    Ok(next.run(req).await)
}

/// Bearer token from the Authorization header, else the auth cookie.
///
/// The scheme is matched case-insensitively. A present but malformed
/// Authorization header is not retried against the cookie.
fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        return value
            .to_str()
            .ok()
            .and_then(|v| v.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}
