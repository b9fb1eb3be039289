mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

/// Public reads and bearer-protected writes.
pub fn routers() -> (Router<AppState>, Router<AppState>) {
    (handlers::read_routes(), handlers::write_routes())
}
