use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::parse_todo_id;
use super::TodoRequest;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(todo_id): Path<String>,
    Json(req): Json<TodoRequest>,
) -> Result<StatusCode, ApiError> {
    let todo_id = parse_todo_id(&todo_id)?;
    let command = req.try_into_command()?;

    state
        .todo_service
        .update_todo(&caller.scope, &todo_id, command)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
