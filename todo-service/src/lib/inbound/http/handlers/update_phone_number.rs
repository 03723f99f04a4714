use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn update_phone_number(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<UpdatePhoneNumberRequest>,
) -> Result<StatusCode, ApiError> {
    let phone_number = PhoneNumber::new(body.phone_number).map_err(UserError::from)?;

    state
        .user_service
        .update_phone_number(&caller.user_id, phone_number)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePhoneNumberRequest {
    phone_number: String,
}
