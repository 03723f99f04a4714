use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::TodoData;
use super::TodoRequest;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(req): Json<TodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .todo_service
        .create_todo(&caller.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}
