//! Request and response DTOs
//!
//! Field names match what existing clients send and expect.

use serde::{Deserialize, Serialize};

use crate::data::{TimelineEntry, User, UserId};

/// POST /sign-up
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile: String,
    pub password: String,
}

/// POST /login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /tweet
#[derive(Debug, Clone, Deserialize)]
pub struct TweetRequest {
    pub tweet: String,
}

/// POST /follow
#[derive(Debug, Clone, Deserialize)]
pub struct FollowRequest {
    pub follow: UserId,
}

/// POST /unfollow
#[derive(Debug, Clone, Deserialize)]
pub struct UnfollowRequest {
    pub unfollow: UserId,
}

/// Public user fields returned by sign-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub profile: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            profile: user.profile,
        }
    }
}

/// One timeline item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetResponse {
    pub user_id: UserId,
    pub tweet: String,
}

impl From<TimelineEntry> for TweetResponse {
    fn from(entry: TimelineEntry) -> Self {
        Self {
            user_id: entry.author_id,
            tweet: entry.body,
        }
    }
}

/// GET /timeline, GET /timeline/:user_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub user_id: UserId,
    pub timeline: Vec<TweetResponse>,
}

impl TimelineResponse {
    pub fn new(user_id: UserId, entries: Vec<TimelineEntry>) -> Self {
        Self {
            user_id,
            timeline: entries.into_iter().map(TweetResponse::from).collect(),
        }
    }
}
