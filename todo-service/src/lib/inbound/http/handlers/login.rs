use auth::BearerToken;
use axum::extract::State;
use axum::Form;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::AuthCookie;

/// Exchange form credentials for an access token.
///
/// The body is the bare `{access_token, token_type}` pair expected by
/// OAuth2 password-flow clients. The token is also set as an HTTP-only
/// cookie for browser clients.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Json<BearerToken>), ApiError> {
    let token = state
        .user_service
        .login(&form.username, &form.password)
        .await?;

    Ok((
        jar.add(auth_cookie(&state.auth_cookie, &token)),
        Json(token),
    ))
}

fn auth_cookie(settings: &AuthCookie, token: &BearerToken) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), token.access_token.clone()))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(settings.max_age.num_seconds()))
        .build()
}

#[derive(Clone, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secure: bool) -> AuthCookie {
        AuthCookie {
            name: "access_token".to_string(),
            secure,
            max_age: chrono::Duration::minutes(20),
        }
    }

    #[test]
    fn test_auth_cookie_expires_with_token() {
        let cookie = auth_cookie(&settings(false), &BearerToken::new("abc.def.ghi".to_string()));

        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.max_age(), Some(time::Duration::minutes(20)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_auth_cookie_secure_flag() {
        let cookie = auth_cookie(&settings(true), &BearerToken::new("abc.def.ghi".to_string()));
        assert_eq!(cookie.secure(), Some(true));
        assert!(cookie.to_string().contains("Secure"));
    }
}
