use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::PrimitiveDateTime;

use crate::products::repo_types::{NewProduct, Product, ProductPatch};
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait ProductRepo {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn create_product(&self, product: &NewProduct) -> Result<i64, StoreError>;

    /// Owner of the product, or `None` if it does not exist.
    async fn product_owner(&self, id: i64) -> Result<Option<i64>, StoreError>;

    /// Applies the supplied columns plus `updated_at`; returns rows touched.
    async fn update_product(
        &self,
        id: i64,
        patch: &ProductPatch,
        updated_at: PrimitiveDateTime,
    ) -> Result<u64, StoreError>;
}

/// Renders a patch into a single parameterized UPDATE. Only supplied columns
/// appear in the SET list; `updated_at` is always refreshed.
fn update_statement(
    id: i64,
    patch: &ProductPatch,
    updated_at: PrimitiveDateTime,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE products SET ");
    let mut set = qb.separated(", ");
    if let Some(name) = &patch.name {
        set.push("name = ").push_bind_unseparated(name.clone());
    }
    if let Some(price) = patch.price {
        set.push("price = ").push_bind_unseparated(price);
    }
    if let Some(category_id) = patch.category_id {
        set.push("category_id = ").push_bind_unseparated(category_id);
    }
    set.push("updated_at = ").push_bind_unseparated(updated_at);
    qb.push(" WHERE id = ").push_bind(id);
    qb
}

#[async_trait]
impl ProductRepo for PgStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, user_id, category_id, created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (name, price, user_id, category_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NULL)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.user_id)
        .bind(product.category_id)
        .bind(product.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn product_owner(&self, id: i64) -> Result<Option<i64>, StoreError> {
        let owner = sqlx::query_scalar::<_, i64>(r#"SELECT user_id FROM products WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn update_product(
        &self,
        id: i64,
        patch: &ProductPatch,
        updated_at: PrimitiveDateTime,
    ) -> Result<u64, StoreError> {
        let mut stmt = update_statement(id, patch, updated_at);
        let result = stmt.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const NOW: PrimitiveDateTime = datetime!(2024-05-01 12:00:00);

    #[test]
    fn price_only_patch_sets_price_and_timestamp() {
        let patch = ProductPatch {
            price: Some(500),
            ..Default::default()
        };
        let stmt = update_statement(9, &patch, NOW);
        assert_eq!(
            stmt.sql(),
            "UPDATE products SET price = $1, updated_at = $2 WHERE id = $3"
        );
    }

    #[test]
    fn full_patch_lists_every_column_in_order() {
        let patch = ProductPatch {
            name: Some("Lamp".into()),
            price: Some(10),
            category_id: Some(3),
        };
        let stmt = update_statement(1, &patch, NOW);
        assert_eq!(
            stmt.sql(),
            "UPDATE products SET name = $1, price = $2, category_id = $3, updated_at = $4 WHERE id = $5"
        );
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch {
            category_id: Some(1),
            ..Default::default()
        }
        .is_empty());
    }
}
