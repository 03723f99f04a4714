use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::Password;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let command = ChangePasswordCommand {
        current_password: body.password,
        new_password: Password::new(body.new_password).map_err(UserError::from)?,
    };

    state
        .user_service
        .change_password(&caller.user_id, command)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Clone, Deserialize)]
pub struct ChangePasswordRequest {
    password: String,
    new_password: String,
}
