//! Tweet store: append-only posts

use std::collections::HashSet;

use sqlx::QueryBuilder;

use super::database::{Database, map_constraint_error};
use super::models::{TimelineEntry, UserId};
use crate::error::AppError;

impl Database {
    /// Append a tweet
    ///
    /// # Errors
    /// `NotFound` if the author does not exist
    pub async fn insert_tweet(&self, author_id: UserId, body: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO tweets (author_id, body) VALUES (?, ?)")
            .bind(author_id)
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "duplicate tweet"))?;

        Ok(())
    }

    /// All tweets by any of `author_ids`, oldest first
    ///
    /// Rows come back in insertion order across authors, not grouped by
    /// author.
    pub async fn timeline_for(
        &self,
        author_ids: &HashSet<UserId>,
    ) -> Result<Vec<TimelineEntry>, AppError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("SELECT author_id, body FROM tweets WHERE author_id IN (");
        let mut separated = builder.separated(", ");
        for author_id in author_ids {
            separated.push_bind(*author_id);
        }
        separated.push_unseparated(") ORDER BY id ASC");

        let entries = builder
            .build_query_as::<TimelineEntry>()
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    pub async fn count_tweets(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tweets")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
