use super::Repository;
use crate::database::models::User;
use crate::error::{AppError, Result};
use chrono::Utc;
use uuid::Uuid;

impl Repository {
    /// Create a user; `password_hash` must already be hashed
    pub async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let id = Uuid::new_v4().to_string();

        let user = self
            .executor
            .execute_returning::<User>(
                r#"
                INSERT INTO users (id, name, email, password_hash, created_at)
                VALUES (?, ?, ?, ?, ?)
                RETURNING *
                "#,
                &[
                    id.as_str().into(),
                    name.into(),
                    email.into(),
                    password_hash.into(),
                    Utc::now().into(),
                ],
            )
            .await?;

        tracing::debug!("Created user: {}", user.id);
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.executor
            .fetch_optional::<User>("SELECT * FROM users WHERE id = ?", &[id.into()])
            .await?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    /// Look up a user by email (case-insensitive)
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.executor
            .fetch_optional::<User>(
                "SELECT * FROM users WHERE email = ? COLLATE NOCASE",
                &[email.into()],
            )
            .await
    }

    /// Update name and/or email. `None` fields are left unchanged.
    pub async fn update_user_profile(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User> {
        let rows = self
            .executor
            .execute(
                r#"
                UPDATE users
                SET name = COALESCE(?, name), email = COALESCE(?, email)
                WHERE id = ?
                "#,
                &[name.into(), email.into(), id.into()],
            )
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("User", id));
        }

        tracing::debug!("Updated user profile: {}", id);
        self.get_user(id).await
    }
}
