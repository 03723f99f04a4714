use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_todo_id;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(todo_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    state
        .todo_service
        .delete_todo(&caller.scope, &todo_id)
        .await?;

    tracing::info!(todo_id = %todo_id, user_id = %caller.user_id, "Todo deleted");

    Ok(StatusCode::NO_CONTENT)
}
