// ============================
// crates/backend-lib/src/auth/gate.rs
// ============================
//! Request authorization: bearer extraction plus token validation.
use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use metrics::counter;
use tokengate_common::BEARER_SCHEME;

use super::claims::Claims;
use super::clock::Clock;
use super::token::TokenCodec;
use crate::error::AuthError;
use crate::metrics as keys;

pub const MISSING_HEADER: &str = "missing Authorization header";
pub const MALFORMED_HEADER: &str = "malformed Authorization header, expected 'Bearer <token>'";

/// Outcome of a successful gate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorized {
    /// Authentication is disabled, nobody is identified
    Anonymous,
    /// A valid token was presented
    User(Claims),
}

impl Authorized {
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Authorized::Anonymous => None,
            Authorized::User(claims) => Some(claims),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.claims().map(|c| c.username.as_str())
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` with the scheme matched case-insensitively,
/// one or more spaces after it, and exactly one whitespace-free token.
/// Tabs or other whitespace do not separate the scheme.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingOrMalformedToken(MISSING_HEADER))?;

    let malformed = AuthError::MissingOrMalformedToken(MALFORMED_HEADER);

    let (scheme, rest) = value.split_once(' ').ok_or(malformed.clone())?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(malformed);
    }

    let token = rest.trim_start_matches(' ');
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(malformed);
    }
    Ok(token)
}

/// Precondition check run before protected operations
#[derive(Clone)]
pub struct AuthGate {
    enabled: bool,
    codec: Arc<TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl AuthGate {
    pub fn new(enabled: bool, codec: Arc<TokenCodec>, clock: Arc<dyn Clock>) -> Self {
        Self {
            enabled,
            codec,
            clock,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Authorize a request by its headers.
    ///
    /// When disabled the headers are not looked at.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Authorized, AuthError> {
        if !self.enabled {
            return Ok(Authorized::Anonymous);
        }
        self.record(authorization_value(headers).and_then(|header| self.validate(header)))
    }

    /// Signature-checked claims for the renewal path, expiry not enforced.
    ///
    /// Applies whether or not the gate is enabled.
    pub fn renewal_claims(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = parse_bearer(authorization_value(headers)?)?;
        self.codec.decode(token)
    }

    fn record(&self, result: Result<Claims, AuthError>) -> Result<Authorized, AuthError> {
        if let Err(e) = &result {
            counter!(keys::GATE_REJECTED, "reason" => e.error_code()).increment(1);
            tracing::debug!(error = %e, "request not authorized");
        }
        result.map(Authorized::User)
    }

    fn validate(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let token = parse_bearer(header)?;
        let claims = self.codec.decode(token)?;
        if claims.is_expired(self.clock.now()) {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }
}

fn authorization_value(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    match headers.get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| AuthError::MissingOrMalformedToken(MALFORMED_HEADER)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::clock::ManualClock;
    use crate::auth::token::SigningKey;
    use axum::http::HeaderValue;
    use chrono::Duration;
    use jsonwebtoken::Algorithm;

    const T0: i64 = 1_700_000_000;

    fn codec(key: &[u8]) -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(&SigningKey::new(key.to_vec()), Algorithm::HS256).unwrap())
    }

    fn gate(enabled: bool) -> (AuthGate, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_timestamp(T0));
        (AuthGate::new(enabled, codec(b"gate-key"), clock.clone()), clock)
    }

    fn token_for(key: &[u8], lifetime: Duration) -> (String, Claims) {
        let now = chrono::DateTime::from_timestamp(T0, 0).unwrap();
        let claims = Claims::new("alice", now, lifetime);
        (codec(key).encode(&claims).unwrap(), claims)
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer(Some("Bearer abc")), Ok("abc"));
        assert_eq!(parse_bearer(Some("bearer abc")), Ok("abc"));
        assert_eq!(parse_bearer(Some("  Bearer   abc  ")), Ok("abc"));

        let malformed = Err(AuthError::MissingOrMalformedToken(MALFORMED_HEADER));
        assert_eq!(parse_bearer(Some("Bearer")), malformed);
        assert_eq!(parse_bearer(Some("Bearer ")), malformed);
        assert_eq!(parse_bearer(Some("abc")), malformed);
        assert_eq!(parse_bearer(Some("Bearer a b")), malformed);
        assert_eq!(parse_bearer(Some("Basic dXNlcjpwYXNz")), malformed);
        assert_eq!(parse_bearer(Some("Token Bearer abc")), malformed);
        assert_eq!(parse_bearer(Some("BearerBearer abc")), malformed);
        assert_eq!(parse_bearer(Some("Bearer\tabc")), malformed);
        assert_eq!(parse_bearer(Some("Bearer \tabc")), malformed);
        assert_eq!(parse_bearer(Some("Bearer\u{a0}abc")), malformed);

        let missing = Err(AuthError::MissingOrMalformedToken(MISSING_HEADER));
        assert_eq!(parse_bearer(None), missing);
        assert_eq!(parse_bearer(Some("   ")), missing);
    }

    #[test]
    fn test_valid_token_is_authorized() {
        let (gate, _) = gate(true);
        let (token, claims) = token_for(b"gate-key", Duration::minutes(15));

        let authorized = gate.authorize(&bearer(&token)).unwrap();

        assert_eq!(authorized, Authorized::User(claims));
        assert_eq!(authorized.username(), Some("alice"));
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let (gate, _) = gate(true);
        assert_eq!(
            gate.authorize(&HeaderMap::new()),
            Err(AuthError::MissingOrMalformedToken(MISSING_HEADER))
        );
    }

    #[test]
    fn test_expired_token_is_rejected_even_when_signed() {
        let (gate, clock) = gate(true);
        let (token, _) = token_for(b"gate-key", Duration::minutes(15));

        clock.advance(Duration::minutes(15));
        assert_eq!(gate.authorize(&bearer(&token)), Err(AuthError::Expired));
    }

    #[test]
    fn test_foreign_key_is_invalid_signature() {
        let (gate, _) = gate(true);
        let (token, _) = token_for(b"not-the-gate-key", Duration::minutes(15));

        assert_eq!(
            gate.authorize(&bearer(&token)),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let (gate, _) = gate(true);
        assert!(matches!(
            gate.authorize(&bearer("definitely-not-a-token")),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_disabled_gate_authorizes_everything() {
        let (gate, _) = gate(false);

        assert_eq!(gate.authorize(&HeaderMap::new()), Ok(Authorized::Anonymous));
        assert_eq!(
            gate.authorize(&bearer("garbage")),
            Ok(Authorized::Anonymous)
        );
    }

    #[test]
    fn test_disabled_gate_ignores_opaque_header() {
        let (enabled, _) = gate(true);
        let (disabled, _) = gate(false);
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xe9t\xe9").unwrap(),
        );

        assert_eq!(disabled.authorize(&headers), Ok(Authorized::Anonymous));
        assert_eq!(
            enabled.authorize(&headers),
            Err(AuthError::MissingOrMalformedToken(MALFORMED_HEADER))
        );
    }

    #[test]
    fn test_renewal_claims_skip_expiry_but_not_signature() {
        let (gate, clock) = gate(false);
        let (token, claims) = token_for(b"gate-key", Duration::minutes(15));
        clock.advance(Duration::hours(1));

        assert_eq!(gate.renewal_claims(&bearer(&token)), Ok(claims));

        let (foreign, _) = token_for(b"other-key", Duration::minutes(15));
        assert_eq!(
            gate.renewal_claims(&bearer(&foreign)),
            Err(AuthError::InvalidSignature)
        );
        assert_eq!(
            gate.renewal_claims(&HeaderMap::new()),
            Err(AuthError::MissingOrMalformedToken(MISSING_HEADER))
        );
    }
}
