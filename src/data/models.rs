//! Data models
//!
//! Rust structs representing database rows.
//! Ids are assigned by SQLite on insert.

use serde::{Deserialize, Serialize};

/// User id (SQLite rowid of `users`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// =============================================================================
// User
// =============================================================================

/// Public user fields
///
/// Never carries the password hash; see [`UserCredential`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub profile: String,
}

/// Login lookup result, only consumed by the auth path
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredential {
    pub id: UserId,
    /// Argon2 PHC string
    pub hashed_password: String,
}

// =============================================================================
// Tweet
// =============================================================================

/// One timeline row: who posted what
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TimelineEntry {
    pub author_id: UserId,
    pub body: String,
}
