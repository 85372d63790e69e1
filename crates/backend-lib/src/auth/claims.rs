// ============================
// crates/backend-lib/src/auth/claims.rs
// ============================
//! Claims carried inside a session token.
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token claims. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated account
    pub username: String,
    /// Issued at
    pub iat: i64,
    /// Expires at
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    /// Claims for `username` valid from `now` for `lifetime`
    pub fn new(username: impl Into<String>, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            username: username.into(),
            iat,
            exp: iat + lifetime.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Seconds left until expiration, negative once expired
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        self.exp - now.timestamp()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
