use serde::{Deserialize, Serialize};

use crate::products::repo_types::{Product, ProductPatch};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub category_id: i64,
}

impl CreateProductRequest {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.price > 0 && self.category_id > 0
    }
}

/// Partial update body. Empty names and non-positive numbers count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub category_id: Option<i64>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name.filter(|n| !n.is_empty()),
            price: self.price.filter(|p| *p > 0),
            category_id: self.category_id.filter(|c| *c > 0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}
