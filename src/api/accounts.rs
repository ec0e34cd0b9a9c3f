//! Sign-up and login endpoints

use axum::{Json, extract::State};

use super::dto::{LoginRequest, SignUpRequest, UserResponse};
use crate::AppState;
use crate::error::AppError;
use crate::service::LoginOutcome;

/// POST /sign-up
///
/// Returns the created user's public fields.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }

    let user_id = state
        .timeline
        .create_user(&req.name, &req.email, &req.profile, &req.password)
        .await?;
    let user = state.timeline.get_user(user_id).await?;

    Ok(Json(user.into()))
}

/// POST /login
///
/// Returns `{user_id, access_token}`, or 401 for any bad credential.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginOutcome>, AppError> {
    let outcome = state.timeline.login(&req.email, &req.password).await?;
    Ok(Json(outcome))
}
