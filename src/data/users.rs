//! Credential store: user records and password hashes

use super::database::{Database, map_constraint_error};
use super::models::{User, UserCredential, UserId};
use crate::error::AppError;

impl Database {
    /// Insert a new user
    ///
    /// # Errors
    /// `Conflict` if the email is already registered
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        profile: &str,
        hashed_password: &str,
    ) -> Result<UserId, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, profile, hashed_password)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(profile)
        .bind(hashed_password)
        .execute(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "email is already registered"))?;

        Ok(UserId(result.last_insert_rowid()))
    }

    /// Get public user fields by id
    pub async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, profile FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get id and password hash by email, for login only
    pub async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredential>, AppError> {
        let credential = sqlx::query_as::<_, UserCredential>(
            "SELECT id, hashed_password FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
