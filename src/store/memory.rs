//! In-process store used by unit tests in place of Postgres.

use async_trait::async_trait;
use time::PrimitiveDateTime;
use tokio::sync::Mutex;

use crate::auth::{
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::categories::{repo::CategoryRepo, repo_types::Category};
use crate::messages::{repo::MessageRepo, repo_types::NewMessage};
use crate::products::{
    repo::ProductRepo,
    repo_types::{NewProduct, Product, ProductPatch},
};
use crate::store::StoreError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    products: Vec<Product>,
    messages: Vec<NewMessage>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub async fn users(&self) -> Vec<User> {
        self.tables.lock().await.users.clone()
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.tables.lock().await.categories.clone()
    }

    pub async fn products(&self) -> Vec<Product> {
        self.tables.lock().await.products.clone()
    }

    pub async fn messages(&self) -> Vec<NewMessage> {
        self.tables.lock().await.messages.clone()
    }
}

fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError> {
        let mut t = self.tables.lock().await;
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email"));
        }
        let id = next_id(t.users.len());
        t.users.push(User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            password: user.password_hash.clone(),
        });
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl CategoryRepo for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.categories().await)
    }

    async fn create_category(&self, name: &str, created_at: PrimitiveDateTime) -> Result<i64, StoreError> {
        let mut t = self.tables.lock().await;
        let id = next_id(t.categories.len());
        t.categories.push(Category {
            id,
            name: name.to_string(),
            created_at,
            updated_at: None,
        });
        Ok(id)
    }

    async fn update_category(
        &self,
        id: i64,
        name: &str,
        updated_at: PrimitiveDateTime,
    ) -> Result<u64, StoreError> {
        let mut t = self.tables.lock().await;
        match t.categories.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.name = name.to_string();
                c.updated_at = Some(updated_at);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn category_exists(&self, id: i64) -> Result<bool, StoreError> {
        let t = self.tables.lock().await;
        Ok(t.categories.iter().any(|c| c.id == id))
    }
}

#[async_trait]
impl ProductRepo for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products().await)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<i64, StoreError> {
        let mut t = self.tables.lock().await;
        let id = next_id(t.products.len());
        t.products.push(Product {
            id,
            name: product.name.clone(),
            price: product.price,
            user_id: product.user_id,
            category_id: product.category_id,
            created_at: product.created_at,
            updated_at: None,
        });
        Ok(id)
    }

    async fn product_owner(&self, id: i64) -> Result<Option<i64>, StoreError> {
        let t = self.tables.lock().await;
        Ok(t.products.iter().find(|p| p.id == id).map(|p| p.user_id))
    }

    async fn update_product(
        &self,
        id: i64,
        patch: &ProductPatch,
        updated_at: PrimitiveDateTime,
    ) -> Result<u64, StoreError> {
        let mut t = self.tables.lock().await;
        let Some(p) = t.products.iter_mut().find(|p| p.id == id) else {
            return Ok(0);
        };
        if let Some(name) = &patch.name {
            p.name = name.clone();
        }
        if let Some(price) = patch.price {
            p.price = price;
        }
        if let Some(category_id) = patch.category_id {
            p.category_id = category_id;
        }
        p.updated_at = Some(updated_at);
        Ok(1)
    }
}

#[async_trait]
impl MessageRepo for MemoryStore {
    async fn create_message(&self, message: &NewMessage) -> Result<i64, StoreError> {
        let mut t = self.tables.lock().await;
        t.messages.push(message.clone());
        Ok(next_id(t.messages.len() - 1))
    }
}
