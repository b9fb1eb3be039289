use serde::Serialize;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::datetime::sql_format;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(with = "sql_format")]
    pub created_at: PrimitiveDateTime,
    #[serde(with = "sql_format::option")]
    pub updated_at: Option<PrimitiveDateTime>, // None until first update
}
