//! Tweet and timeline endpoints

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::dto::{TimelineResponse, TweetRequest};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::UserId;
use crate::error::AppError;

/// POST /tweet
pub async fn post_tweet(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<TweetRequest>,
) -> Result<StatusCode, AppError> {
    state.timeline.post_tweet(user_id, &req.tweet).await?;
    Ok(StatusCode::OK)
}

/// GET /timeline
pub async fn own_timeline(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<TimelineResponse>, AppError> {
    let entries = state.timeline.get_timeline(user_id).await?;
    Ok(Json(TimelineResponse::new(user_id, entries)))
}

/// GET /timeline/:user_id
///
/// Public view of any user's timeline.
pub async fn user_timeline(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<TimelineResponse>, AppError> {
    let user_id = UserId(user_id);
    let entries = state.timeline.get_timeline(user_id).await?;
    Ok(Json(TimelineResponse::new(user_id, entries)))
}
