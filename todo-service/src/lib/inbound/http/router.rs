use std::sync::Arc;
use std::time::Duration;

use auth::TokenValidator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::get_current_user::get_current_user;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::todos;
use super::handlers::update_phone_number::update_phone_number;
use super::middleware::authenticate as auth_middleware;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::ports::UserServicePort;

/// How the access token is carried in a cookie for browser clients.
#[derive(Debug, Clone)]
pub struct AuthCookie {
    pub name: String,
    pub secure: bool,
    /// Matches the access token lifetime.
    pub max_age: chrono::Duration,
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
    pub token_validator: Arc<TokenValidator>,
    pub auth_cookie: AuthCookie,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
    token_validator: Arc<TokenValidator>,
    auth_cookie: AuthCookie,
) -> Router {
    let state = AppState {
        user_service,
        todo_service,
        token_validator,
        auth_cookie,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/token", post(login));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user))
        .route("/api/users/me/password", put(change_password))
        .route("/api/users/me/phone-number", put(update_phone_number))
        .route(
            "/api/todos",
            get(todos::list_todos).post(todos::create_todo),
        )
        .route(
            "/api/todos/:todo_id",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens and cookies.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
