//! Follow graph endpoints

use axum::{Json, extract::State, http::StatusCode};

use super::dto::{FollowRequest, UnfollowRequest};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;

/// POST /follow
pub async fn follow(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<FollowRequest>,
) -> Result<StatusCode, AppError> {
    state.timeline.follow(user_id, req.follow).await?;
    Ok(StatusCode::OK)
}

/// POST /unfollow
pub async fn unfollow(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<UnfollowRequest>,
) -> Result<StatusCode, AppError> {
    state.timeline.unfollow(user_id, req.unfollow).await?;
    Ok(StatusCode::OK)
}
