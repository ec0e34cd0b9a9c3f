//! Timeline service
//!
//! Sign-up, login, posting, the follow graph, and timeline aggregation.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::AuthService;
use crate::data::{Database, TimelineEntry, User, UserId};
use crate::error::AppError;
use crate::metrics::{LOGIN_ATTEMPTS_TOTAL, TWEETS_POSTED_TOTAL, USERS_CREATED_TOTAL};

/// Maximum tweet length in Unicode scalar values
pub const MAX_TWEET_CHARS: usize = 300;

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub user_id: UserId,
    pub access_token: String,
}

/// Timeline service
pub struct TimelineService {
    db: Arc<Database>,
    auth: Arc<AuthService>,
}

impl TimelineService {
    /// Create new timeline service
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Register a new user
    ///
    /// # Errors
    /// `Conflict` if the email is already registered
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        profile: &str,
        plain_password: &str,
    ) -> Result<UserId, AppError> {
        let auth = self.auth.clone();
        let plain_password = plain_password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || auth.hash_password(&plain_password))
                .await
                .map_err(|e| AppError::Internal(e.into()))??;

        let user_id = self
            .db
            .create_user(name, email, profile, &hashed_password)
            .await?;

        USERS_CREATED_TOTAL.inc();
        tracing::info!(user_id = %user_id, "User created");

        Ok(user_id)
    }

    pub async fn get_user(&self, user_id: UserId) -> Result<User, AppError> {
        self.db
            .find_user_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Check credentials and issue an access token
    ///
    /// Unknown email and wrong password are indistinguishable to the caller,
    /// and both run one argon2 verification.
    pub async fn login(&self, email: &str, plain_password: &str) -> Result<LoginOutcome, AppError> {
        let credential = self.db.find_credential_by_email(email).await?;

        let auth = self.auth.clone();
        let plain_password = plain_password.to_owned();
        let stored_hash = credential
            .as_ref()
            .map(|credential| credential.hashed_password.clone());
        let verified = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => auth.verify_password(&plain_password, &hash),
            None => auth.verify_absent_password(&plain_password),
        })
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

        let credential = match credential {
            Some(credential) if verified => credential,
            _ => {
                LOGIN_ATTEMPTS_TOTAL.with_label_values(&["rejected"]).inc();
                tracing::debug!("Login rejected");
                return Err(AppError::Unauthorized);
            }
        };

        let access_token = self.auth.issue_token(credential.id)?;
        LOGIN_ATTEMPTS_TOTAL.with_label_values(&["accepted"]).inc();
        tracing::info!(user_id = %credential.id, "Login accepted");

        Ok(LoginOutcome {
            user_id: credential.id,
            access_token,
        })
    }

    // =========================================================================
    // Tweets
    // =========================================================================

    /// Post a tweet
    ///
    /// # Errors
    /// `Validation` if `body` exceeds [`MAX_TWEET_CHARS`]; nothing is written
    pub async fn post_tweet(&self, author_id: UserId, body: &str) -> Result<(), AppError> {
        let length = body.chars().count();
        if length > MAX_TWEET_CHARS {
            return Err(AppError::Validation(format!(
                "Your tweet exceeds {} characters",
                MAX_TWEET_CHARS
            )));
        }

        self.db.insert_tweet(author_id, body).await?;

        TWEETS_POSTED_TOTAL.inc();
        tracing::info!(author_id = %author_id, length, "Tweet posted");

        Ok(())
    }

    // =========================================================================
    // Follow graph
    // =========================================================================

    /// Follow another user
    ///
    /// Following the same user twice is a no-op.
    ///
    /// # Errors
    /// - `Validation` when following yourself
    /// - `NotFound` when either user does not exist
    pub async fn follow(&self, follower_id: UserId, followed_id: UserId) -> Result<(), AppError> {
        if follower_id == followed_id {
            return Err(AppError::Validation("cannot follow yourself".to_string()));
        }

        let created = self.db.add_follow_edge(follower_id, followed_id).await?;
        tracing::info!(
            follower_id = %follower_id,
            followed_id = %followed_id,
            created,
            "Follow"
        );

        Ok(())
    }

    /// Stop following; not following is not an error
    pub async fn unfollow(&self, follower_id: UserId, followed_id: UserId) -> Result<(), AppError> {
        let removed = self
            .db
            .remove_follow_edge(follower_id, followed_id)
            .await?;
        tracing::info!(
            follower_id = %follower_id,
            followed_id = %followed_id,
            removed,
            "Unfollow"
        );

        Ok(())
    }

    // =========================================================================
    // Timeline
    // =========================================================================

    /// Tweets by `user_id` and everyone they follow, oldest first
    pub async fn get_timeline(&self, user_id: UserId) -> Result<Vec<TimelineEntry>, AppError> {
        let mut author_ids = self.db.followed_ids_of(user_id).await?;
        author_ids.insert(user_id);

        self.db.timeline_for(&author_ids).await
    }
}
