use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    routing::post,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{info, instrument, warn};

use crate::{
    datetime,
    error::AppError,
    messages::{dto::CreateMessageRequest, repo::MessageRepo, repo_types::NewMessage},
    state::AppState,
};

/// Contact form endpoint. Browsers on `allowed_origin` may post to it; the
/// CORS layer answers their preflight before routing.
pub fn message_routes(allowed_origin: HeaderValue) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/create/message", post(create_message))
        .layer(cors)
}

#[instrument(skip(state, payload))]
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Json(payload) = payload?;
    if !payload.is_complete() {
        warn!("message validation failed");
        return Err(AppError::validation("All fields are required"));
    }

    let now = datetime::now();
    let message = NewMessage {
        name: payload.name,
        email: payload.email,
        phone_number: payload.phone_number,
        subject: payload.subject,
        message: payload.message,
        created_at: now,
        updated_at: now,
    };
    let id = state
        .store
        .create_message(&message)
        .await
        .map_err(AppError::store("Failed to create Message"))?;

    info!(message_id = id, "message received");
    Ok((
        StatusCode::CREATED,
        format!("Message created successfully with ID: {id}"),
    ))
}
