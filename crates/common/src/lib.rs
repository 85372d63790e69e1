// ================
// common/src/lib.rs
// ================
//! Wire types shared between the `tokengate` server and its clients.
//! This module defines the JSON bodies of the `/auth` endpoints and the
//! error envelope every failed request returns.

use serde::{Deserialize, Serialize};

/// Scheme a client must put in front of the token in the `Authorization` header
pub const BEARER_SCHEME: &str = "Bearer";

/// Body of `POST /auth/login`
#[derive(Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    /// Account name as registered in the credential store
    pub username: String,
    /// Plaintext password, only ever compared against the stored hash
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful response of `POST /auth/login` and `POST /auth/refresh`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// Signed token to present as `Authorization: Bearer <token>`
    pub token: String,
    /// Always `"Bearer"`
    pub token_type: String,
    /// Expiration as Unix seconds
    pub expires_at: i64,
    /// Seconds left until expiration at the moment of issuance
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(token: String, expires_at: i64, expires_in: i64) -> Self {
        Self {
            token,
            token_type: BEARER_SCHEME.to_string(),
            expires_at,
            expires_in,
        }
    }
}

/// Response of `GET /auth/whoami`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WhoAmI {
    /// Authenticated user, `None` when authentication is disabled
    pub username: Option<String>,
    /// Issued-at of the presented token (Unix seconds)
    pub issued_at: Option<i64>,
    /// Expiration of the presented token (Unix seconds)
    pub expires_at: Option<i64>,
    /// Whether the server enforces authentication at all
    pub auth_enabled: bool,
}

/// Response of `GET /health`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub version: String,
}

/// Error envelope: `{"error": {"code": ..., "message": ...}}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Machine-readable code plus a human-readable message
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}
