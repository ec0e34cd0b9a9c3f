//! Follow graph store: directed follower -> followed edges

use std::collections::HashSet;

use super::database::{Database, map_constraint_error};
use super::models::UserId;
use crate::error::AppError;

impl Database {
    /// Insert a follow edge
    ///
    /// The (follower, followed) pair is the primary key, so following twice
    /// is a no-op.
    ///
    /// # Returns
    /// `true` if a new edge was created
    ///
    /// # Errors
    /// `NotFound` if either user does not exist
    pub async fn add_follow_edge(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO follow_edges (follower_id, followed_id)
            VALUES (?, ?)
            ON CONFLICT(follower_id, followed_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "follow edge already exists"))?;

        Ok(result.rows_affected() == 1)
    }

    /// Delete a follow edge if present
    ///
    /// # Returns
    /// `true` if an edge was removed
    pub async fn remove_follow_edge(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM follow_edges WHERE follower_id = ? AND followed_id = ?")
                .bind(follower_id)
                .bind(followed_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All user ids followed by `follower_id`
    pub async fn followed_ids_of(&self, follower_id: UserId) -> Result<HashSet<UserId>, AppError> {
        let ids = sqlx::query_scalar::<_, UserId>(
            "SELECT followed_id FROM follow_edges WHERE follower_id = ?",
        )
        .bind(follower_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }
}
