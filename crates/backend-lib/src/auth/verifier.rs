// ============================
// crates/backend-lib/src/auth/verifier.rs
// ============================
//! Credential verification against the credential store.
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::credentials::CredentialStore;
use super::password::{hash_password, verify_password};
use crate::error::AuthError;

/// Hash verified on unknown usernames so both failure paths cost the same
static DECOY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("tokengate-decoy-password").ok());

/// Checks username/password pairs
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn CredentialStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Returns `Ok(true)` only when the user exists and the password matches.
    ///
    /// Unknown user and wrong password are both `Ok(false)`. `Err` is
    /// reserved for a store that could not answer.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        match self.store.lookup(username)? {
            Some(hash) => Ok(verify_password(&hash, password)),
            None => {
                if let Some(decoy) = DECOY_HASH.as_deref() {
                    let _ = verify_password(decoy, password);
                }
                Ok(false)
            },
        }
    }
}
