use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::Principal,
    categories::{
        dto::{CategoryList, CategoryRequest},
        repo::CategoryRepo,
    },
    datetime,
    error::AppError,
    path::positive_id,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/create/categories", post(create_category))
        .route("/update/categories/", put(update_category_without_id))
        .route("/update/categories/:id", put(update_category))
}

#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoryList>, AppError> {
    let categories = state
        .store
        .list_categories()
        .await
        .map_err(AppError::store("Failed to fetch categories"))?;
    Ok(Json(CategoryList { categories }))
}

#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Json(payload) = payload?;
    if payload.name.is_empty() {
        warn!("category name missing");
        return Err(AppError::validation("Name is required"));
    }

    let id = state
        .store
        .create_category(&payload.name, datetime::now())
        .await
        .map_err(AppError::store("Failed to create Category"))?;

    info!(category_id = id, user_id, "category created");
    Ok((
        StatusCode::CREATED,
        format!("Category created successfully with ID: {id}"),
    ))
}

/// `PUT /update/categories/` with nothing after the slash.
async fn update_category_without_id() -> Result<StatusCode, AppError> {
    Err(AppError::validation("Invalid category ID"))
}

#[instrument(skip(state, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    Path(raw_id): Path<String>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = positive_id(&raw_id, "Invalid category ID")?;
    let Json(payload) = payload?;
    if payload.name.is_empty() {
        warn!(category_id = id, "category name missing");
        return Err(AppError::validation("Name is required"));
    }

    let touched = state
        .store
        .update_category(id, &payload.name, datetime::now())
        .await
        .map_err(AppError::store("Failed to update category"))?;
    if touched == 0 {
        return Err(AppError::not_found("Category not found"));
    }

    info!(category_id = id, user_id, "category updated");
    Ok(StatusCode::OK)
}
