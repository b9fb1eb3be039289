use serde::{Deserialize, Serialize};

use crate::categories::repo_types::Category;

/// Body of both create and update; only the name is client-controlled.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}
