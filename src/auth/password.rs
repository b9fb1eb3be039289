use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

/// Well-formed hash of no known password, with the same parameters as
/// [`hash_password`] output.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$fxtx812+z/Z9LnZJRjwSVw$5aDSZB2vyboW9nRJcEgP6R1isAcMg8fm9Rxi3sHnMwA";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Salted Argon2id hash with the library's default cost, PHC-encoded.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            PasswordError::Hashing(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Fails closed: an unparsable stored hash counts as a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "stored password hash is not a valid PHC string");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Pays the cost of a full verification when there is no stored hash to
/// check, so unknown accounts answer as slowly as wrong passwords.
pub fn verify_without_account(plain: &str) {
    let _ = verify_password(plain, DUMMY_HASH);
}
