// ============================
// tokengate-backend/src/lib.rs
// ============================
//! Token authentication service: credential verification, signed session
//! tokens with bounded renewal, and request authorization for axum routers.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;

use std::sync::Arc;

use crate::auth::token_generator::generate_signing_key;
use crate::auth::{
    AuthGate, Clock, CredentialStore, CredentialVerifier, SessionIssuer, SystemClock, TokenCodec,
};
use crate::config::Settings;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Login and renewal
    pub issuer: Arc<SessionIssuer>,
    /// Request authorization
    pub gate: Arc<AuthGate>,
    /// Settings, immutable after startup
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state backed by the configured users and the wall clock
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let store = Arc::new(settings.credentials());
        Self::with_parts(settings, store, Arc::new(SystemClock))
    }

    /// Create a new application state with an explicit credential store and clock
    pub fn with_parts(
        settings: Settings,
        store: Arc<dyn CredentialStore>,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        settings.validate()?;

        let key = match settings.signing_key()? {
            Some(key) => key,
            None => {
                tracing::warn!("no signing key configured, tokens are signed with an ephemeral key");
                generate_signing_key()
            },
        };
        if key.len() < config::RECOMMENDED_KEY_BYTES {
            tracing::warn!(
                bytes = key.len(),
                "signing key is shorter than {} bytes",
                config::RECOMMENDED_KEY_BYTES
            );
        }

        let codec = Arc::new(TokenCodec::new(&key, settings.auth.algorithm)?);
        let verifier = CredentialVerifier::new(store);
        let issuer = SessionIssuer::new(
            verifier,
            codec.clone(),
            clock.clone(),
            settings.token_policy(),
        );
        let gate = AuthGate::new(settings.auth.enabled, codec, clock);

        if !settings.auth.enabled {
            tracing::warn!("authentication is disabled, every request is authorized");
        }

        Ok(Self {
            issuer: Arc::new(issuer),
            gate: Arc::new(gate),
            settings: Arc::new(settings),
        })
    }
}
