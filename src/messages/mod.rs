mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::{http::HeaderValue, Router};

pub fn router(allowed_origin: HeaderValue) -> Router<AppState> {
    handlers::message_routes(allowed_origin)
}
