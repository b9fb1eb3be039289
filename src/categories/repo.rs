use async_trait::async_trait;
use time::PrimitiveDateTime;

use crate::categories::repo_types::Category;
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait CategoryRepo {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Inserts with a null `updated_at` and returns the new id.
    async fn create_category(&self, name: &str, created_at: PrimitiveDateTime) -> Result<i64, StoreError>;

    /// Returns the number of rows touched; zero means no such category.
    async fn update_category(
        &self,
        id: i64,
        name: &str,
        updated_at: PrimitiveDateTime,
    ) -> Result<u64, StoreError>;

    async fn category_exists(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
impl CategoryRepo for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_category(&self, name: &str, created_at: PrimitiveDateTime) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO categories (name, created_at, updated_at)
            VALUES ($1, $2, NULL)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_category(
        &self,
        id: i64,
        name: &str,
        updated_at: PrimitiveDateTime,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE categories
               SET name = $1, updated_at = $2
             WHERE id = $3
            "#,
        )
        .bind(name)
        .bind(updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn category_exists(&self, id: i64) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
