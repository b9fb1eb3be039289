use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{
    auth::jwt::{JwtKeys, TokenError},
    error::AppError,
};

const BEARER: &str = "Bearer ";

/// The authenticated user behind a request, inserted by [`require_bearer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal(pub i64);

/// Rejects with 401 unless the request carries a valid bearer token; on
/// success the resolved [`Principal`] is attached for downstream handlers.
pub async fn require_bearer(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::unauthorized("Missing or invalid token"))?;

    let user_id = keys.verify(token).map_err(|e| {
        warn!(error = %e, "bearer token rejected");
        match e {
            TokenError::InvalidClaims(_) => AppError::unauthorized("Invalid token claims"),
            _ => AppError::unauthorized("Invalid token"),
        }
    })?;

    req.extensions_mut().insert(Principal(user_id));
    Ok(next.run(req).await)
}

/// Token part of `Authorization: Bearer <token>`; the scheme is matched
/// case-insensitively and an empty token counts as absent.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    if value.len() <= BEARER.len() {
        return None;
    }
    let scheme = value.get(..BEARER.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return None;
    }
    value.get(BEARER.len()..)
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or_else(|| AppError::unauthorized("Missing or invalid token"))
    }
}
