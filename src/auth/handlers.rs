use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        password::{hash_password, verify_password, verify_without_account},
        repo::UserRepo,
        repo_types::NewUser,
    },
    error::AppError,
    state::AppState,
    store::StoreError,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Json(payload) = payload?;

    if !payload.is_complete() {
        warn!(
            name_empty = payload.name.is_empty(),
            email_empty = payload.email.is_empty(),
            phone_empty = payload.phone_number.is_empty(),
            password_empty = payload.password.is_empty(),
            "registration validation failed"
        );
        return Err(AppError::validation("All fields are required"));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;

    let user = NewUser {
        name: payload.name,
        email: payload.email,
        phone_number: payload.phone_number,
        password_hash,
    };
    let id = match state.store.create_user(&user).await {
        Ok(id) => id,
        Err(StoreError::Conflict(_)) => {
            warn!(email = %user.email, "email already registered");
            return Err(AppError::validation("Email already registered"));
        }
        Err(e) => return Err(AppError::store("Failed to register user")(e)),
    };

    info!(user_id = id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        format!("User registered successfully with ID: {id}"),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload.map_err(|_| AppError::validation("Invalid request payload"))?;

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Email and Password are required"));
    }

    let Some(user) = state
        .store
        .find_user_by_email(&payload.email)
        .await
        .map_err(AppError::store("Failed to fetch user"))?
    else {
        verify_without_account(&payload.password);
        warn!(email = %payload.email, "login unknown email");
        return Err(AppError::unauthorized("Invalid email or password"));
    };

    if !verify_password(&payload.password, &user.password) {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let token = state
        .jwt
        .issue(user.id, &user.name)
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {e}")))?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(LoginResponse {
        user: PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            token,
        },
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::{
        auth::password::verify_password,
        state::AppState,
        store::memory::MemoryStore,
        test_support::{send, send_json},
    };

    fn app() -> (axum::Router, Arc<MemoryStore>, AppState) {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::fake_with(store.clone());
        (crate::app::build_app(state.clone()), store, state)
    }

    fn alice() -> serde_json::Value {
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "phone_number": "555-0100",
            "password": "hunter22"
        })
    }

    #[tokio::test]
    async fn register_stores_a_hash_not_the_plaintext() {
        let (app, store, _) = app();
        let (status, body) = send_json(&app, Method::POST, "/register", None, alice()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "User registered successfully with ID: 1");

        let users = store.users().await;
        assert_eq!(users.len(), 1);
        assert_ne!(users[0].password, "hunter22");
        assert!(verify_password("hunter22", &users[0].password));
    }

    #[tokio::test]
    async fn register_with_empty_password_writes_nothing() {
        let (app, store, _) = app();
        let mut payload = alice();
        payload["password"] = json!("");
        let (status, body) = send_json(&app, Method::POST, "/register", None, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "All fields are required");
        assert!(store.users().await.is_empty());
    }

    #[tokio::test]
    async fn register_with_missing_field_is_bad_request() {
        let (app, store, _) = app();
        let payload = json!({ "name": "Alice", "email": "a@example.com", "password": "x" });
        let (status, _) = send_json(&app, Method::POST, "/register", None, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(store.users().await.is_empty());
    }

    #[tokio::test]
    async fn register_with_malformed_json_is_bad_request() {
        let (app, _, _) = app();
        let (status, _) = send(&app, Method::POST, "/register", None, "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (app, store, _) = app();
        send_json(&app, Method::POST, "/register", None, alice()).await;
        let (status, body) = send_json(&app, Method::POST, "/register", None, alice()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Email already registered");
        assert_eq!(store.users().await.len(), 1);
    }

    #[tokio::test]
    async fn login_returns_user_and_a_token_for_that_user() {
        let (app, _, state) = app();
        send_json(&app, Method::POST, "/register", None, alice()).await;

        let creds = json!({ "email": "alice@example.com", "password": "hunter22" });
        let (status, body) = send_json(&app, Method::POST, "/login", None, creds).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let user = &json["user"];
        assert_eq!(user["id"], 1);
        assert_eq!(user["name"], "Alice");
        assert_eq!(user["email"], "alice@example.com");
        assert_eq!(user["phone_number"], "555-0100");
        let token = user["token"].as_str().unwrap();
        assert_eq!(state.jwt.verify(token).unwrap(), 1);
    }

    #[tokio::test]
    async fn login_with_wrong_password_or_unknown_email_is_unauthorized() {
        let (app, _, _) = app();
        send_json(&app, Method::POST, "/register", None, alice()).await;

        let wrong = json!({ "email": "alice@example.com", "password": "nope" });
        let (status, body) = send_json(&app, Method::POST, "/login", None, wrong).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Invalid email or password");

        let unknown = json!({ "email": "bob@example.com", "password": "hunter22" });
        let (status, body) = send_json(&app, Method::POST, "/login", None, unknown).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Invalid email or password");
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let (app, _, _) = app();
        let (status, body) =
            send_json(&app, Method::POST, "/login", None, json!({ "email": "a@b.c" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Email and Password are required");

        let (status, body) = send(&app, Method::POST, "/login", None, "42").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid request payload");
    }
}
