use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::repo::UserRepo;
use crate::categories::repo::CategoryRepo;
use crate::config::DatabaseConfig;
use crate::messages::repo::MessageRepo;
use crate::products::repo::ProductRepo;

#[cfg(test)]
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write; carries the offending column.
    #[error("duplicate value for {0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Everything the handlers need from persistence.
pub trait Store: UserRepo + CategoryRepo + ProductRepo + MessageRepo + Send + Sync {}

impl<T> Store for T where T: UserRepo + CategoryRepo + ProductRepo + MessageRepo + Send + Sync {}

pub type DynStore = Arc<dyn Store>;

/// Postgres-backed store. Each repository method issues exactly one statement.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(cfg.acquire_timeout())
            .connect(&cfg.url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }
}
