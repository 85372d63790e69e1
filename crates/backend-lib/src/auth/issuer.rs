// ============================
// crates/backend-lib/src/auth/issuer.rs
// ============================
//! Login and renewal: the two ways a client obtains a token.
use std::sync::Arc;

use chrono::Duration;
use metrics::counter;

use super::claims::Claims;
use super::clock::Clock;
use super::token::TokenCodec;
use super::verifier::CredentialVerifier;
use crate::error::AuthError;
use crate::metrics as keys;

/// Lifetime and renewal policy of issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// How long a freshly issued token stays valid
    pub lifetime: Duration,
    /// Renewal is allowed once at most this much lifetime is left
    pub renewal_window: Duration,
    /// How long after expiry a token may still be renewed
    pub renewal_grace: Duration,
}

impl TokenPolicy {
    /// The renewal grace defaults to the renewal window
    pub fn new(expiration_minutes: u32, renewal_window_secs: u32) -> Self {
        let renewal_window = Duration::seconds(i64::from(renewal_window_secs));
        Self {
            lifetime: Duration::minutes(i64::from(expiration_minutes)),
            renewal_window,
            renewal_grace: renewal_window,
        }
    }

    /// Override the renewal grace, `None` keeps the current one
    pub fn with_renewal_grace(mut self, grace_secs: Option<u32>) -> Self {
        if let Some(secs) = grace_secs {
            self.renewal_grace = Duration::seconds(i64::from(secs));
        }
        self
    }
}

/// A signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Mints tokens on login and on renewal
#[derive(Clone)]
pub struct SessionIssuer {
    verifier: CredentialVerifier,
    codec: Arc<TokenCodec>,
    clock: Arc<dyn Clock>,
    policy: TokenPolicy,
}

impl SessionIssuer {
    pub fn new(
        verifier: CredentialVerifier,
        codec: Arc<TokenCodec>,
        clock: Arc<dyn Clock>,
        policy: TokenPolicy,
    ) -> Self {
        Self {
            verifier,
            codec,
            clock,
            policy,
        }
    }

    /// Verify credentials and issue a fresh token
    #[tracing::instrument(name = "login", skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        if !self.verifier.verify(username, password)? {
            counter!(keys::LOGIN_FAILURE).increment(1);
            tracing::warn!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.mint(username)?;
        counter!(keys::LOGIN_SUCCESS).increment(1);
        tracing::info!(jti = %issued.claims.jti, exp = issued.claims.exp, "token issued");
        Ok(issued)
    }

    /// Exchange a token close to expiry for a new one.
    ///
    /// The old token is not invalidated; both stay valid until their own
    /// expiration.
    #[tracing::instrument(name = "renew", skip_all)]
    pub fn renew(&self, token: &str) -> Result<IssuedToken, AuthError> {
        let claims = self.codec.decode(token).inspect_err(|e| {
            counter!(keys::REFRESH_REJECTED).increment(1);
            tracing::debug!(error = %e, "renewal token rejected");
        })?;
        self.renew_claims(&claims)
    }

    /// Renewal check for claims whose signature was already verified
    pub fn renew_claims(&self, claims: &Claims) -> Result<IssuedToken, AuthError> {
        let now = self.clock.now();
        let remaining = claims.remaining_secs(now);

        if remaining > self.policy.renewal_window.num_seconds() {
            counter!(keys::REFRESH_REJECTED).increment(1);
            tracing::debug!(username = %claims.username, remaining, "renewal requested too early");
            return Err(AuthError::RenewalNotYetAllowed);
        }

        if -remaining > self.policy.renewal_grace.num_seconds() {
            counter!(keys::REFRESH_REJECTED).increment(1);
            tracing::debug!(username = %claims.username, remaining, "token expired past renewal grace");
            return Err(AuthError::Expired);
        }

        let issued = self.mint(&claims.username)?;
        counter!(keys::REFRESH_SUCCESS).increment(1);
        tracing::info!(
            username = %claims.username,
            previous_jti = %claims.jti,
            jti = %issued.claims.jti,
            exp = issued.claims.exp,
            "token renewed"
        );
        Ok(issued)
    }

    fn mint(&self, username: &str) -> Result<IssuedToken, AuthError> {
        let claims = Claims::new(username, self.clock.now(), self.policy.lifetime);
        let token = self.codec.encode(&claims)?;
        Ok(IssuedToken { token, claims })
    }
}
