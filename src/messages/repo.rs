use async_trait::async_trait;

use crate::messages::repo_types::NewMessage;
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait MessageRepo {
    async fn create_message(&self, message: &NewMessage) -> Result<i64, StoreError>;
}

#[async_trait]
impl MessageRepo for PgStore {
    async fn create_message(&self, message: &NewMessage) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO messages (name, email, phone_number, subject, message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone_number)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.created_at)
        .bind(message.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
