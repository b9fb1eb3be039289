use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::Principal,
    categories::repo::CategoryRepo,
    datetime,
    error::AppError,
    path::positive_id,
    products::{
        dto::{CreateProductRequest, ProductList, UpdateProductRequest},
        repo::ProductRepo,
        repo_types::NewProduct,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/products", get(list_products))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/create/product", post(create_product))
        .route("/update/products/", put(update_product_without_id))
        .route("/update/products/:id", put(update_product))
}

#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<ProductList>, AppError> {
    let products = state
        .store
        .list_products()
        .await
        .map_err(AppError::store("Failed to fetch products"))?;
    Ok(Json(ProductList { products }))
}

/// Rejects with 400 unless `category_id` names an existing category.
async fn ensure_category(state: &AppState, category_id: i64) -> Result<(), AppError> {
    let exists = state
        .store
        .category_exists(category_id)
        .await
        .map_err(AppError::store("Failed to check category existence"))?;
    if !exists {
        warn!(category_id, "category not found");
        return Err(AppError::validation("Category not found"));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Json(payload) = payload?;
    if !payload.is_valid() {
        warn!(
            price = payload.price,
            category_id = payload.category_id,
            name_empty = payload.name.is_empty(),
            "product validation failed"
        );
        return Err(AppError::validation("All fields are required and must be valid"));
    }

    ensure_category(&state, payload.category_id).await?;

    let product = NewProduct {
        name: payload.name,
        price: payload.price,
        user_id,
        category_id: payload.category_id,
        created_at: datetime::now(),
    };
    let id = state
        .store
        .create_product(&product)
        .await
        .map_err(AppError::store("Failed to create product"))?;

    info!(product_id = id, user_id, "product created");
    Ok((
        StatusCode::CREATED,
        format!("Product created successfully with ID: {id}"),
    ))
}

/// `PUT /update/products/` with nothing after the slash.
async fn update_product_without_id() -> Result<StatusCode, AppError> {
    Err(AppError::validation("Invalid product ID"))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = positive_id(&raw_id, "Invalid product ID")?;

    let owner = state
        .store
        .product_owner(id)
        .await
        .map_err(AppError::store("Failed to fetch product"))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    if owner != user_id {
        warn!(product_id = id, user_id, owner, "update by non-owner");
        return Err(AppError::unauthorized(
            "Unauthorized: You do not own this product",
        ));
    }

    let Json(payload) = payload?;
    let patch = payload.into_patch();
    if let Some(category_id) = patch.category_id {
        ensure_category(&state, category_id).await?;
    }
    if patch.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    let touched = state
        .store
        .update_product(id, &patch, datetime::now())
        .await
        .map_err(AppError::store("Failed to update product"))?;
    if touched == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    info!(product_id = id, user_id, "product updated");
    Ok(StatusCode::OK)
}
