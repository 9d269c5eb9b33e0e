use serde::{Deserialize, Serialize};

/// Login form body (OAuth2 password-flow field names).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String, // the user's email
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
