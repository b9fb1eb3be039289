use serde::{Deserialize, Serialize};

/// Request body for user registration. Absent fields decode as empty and are
/// rejected by the handler.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.phone_number, &self.password]
            .iter()
            .all(|f| !f.is_empty())
    }
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
}

/// Public part of the user plus the freshly issued token.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub token: String,
}
