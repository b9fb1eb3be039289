use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::{auth::claims::Claims, config::JwtConfig, state::AppState};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("invalid token claims: subject {0:?} is not a user id")]
    InvalidClaims(String),
    #[error("configured token lifetime does not give a future expiry")]
    InvalidLifetime,
}

/// HS256 signing and verification keys, built once from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::seconds(cfg.ttl_days.saturating_mul(86_400)),
        }
    }

    /// Signs a token for `user_id`; `name` rides along in `iss`.
    pub fn issue(&self, user_id: i64, name: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, name, OffsetDateTime::now_utc())
    }

    fn issue_at(&self, user_id: i64, name: &str, now: OffsetDateTime) -> Result<String, TokenError> {
        let exp = now
            .checked_add(self.ttl)
            .filter(|exp| *exp > now)
            .ok_or(TokenError::InvalidLifetime)?;
        let claims = Claims {
            sub: user_id.to_string(),
            iss: name.to_string(),
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    /// Checks signature and expiry, then resolves the subject to a user id.
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(TokenError::InvalidToken)?;
        let user_id = data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::InvalidClaims(data.claims.sub.clone()))?;
        debug!(user_id, "jwt verified");
        Ok(user_id)
    }
}
