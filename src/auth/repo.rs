use async_trait::async_trait;

use crate::auth::repo_types::{NewUser, User};
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait UserRepo {
    /// Insert a user and return its id. A taken email yields `StoreError::Conflict("email")`.
    async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl UserRepo for PgStore {
    async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, email, phone_number, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict("email"),
            other => StoreError::Database(other),
        })?;
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone_number, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
