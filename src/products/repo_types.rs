use serde::Serialize;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::datetime::sql_format;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub user_id: i64, // owner, fixed at creation
    pub category_id: i64,
    #[serde(with = "sql_format")]
    pub created_at: PrimitiveDateTime,
    #[serde(with = "sql_format::option")]
    pub updated_at: Option<PrimitiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub created_at: PrimitiveDateTime,
}

/// Columns a product update may change. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub category_id: Option<i64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category_id.is_none()
    }
}
