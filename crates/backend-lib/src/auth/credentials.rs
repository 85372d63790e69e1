// ============================
// crates/backend-lib/src/auth/credentials.rs
// ============================
//! Credential store seam: username → password hash.
use std::collections::HashMap;

use crate::error::AuthError;

/// Read-only lookup of stored password hashes.
///
/// Implementations must be cheap to call concurrently; the store is loaded
/// once at startup and never mutated by the authentication core.
pub trait CredentialStore: Send + Sync {
    /// Stored PHC hash for `username`, `None` when the user is unknown.
    ///
    /// An `Err` means the store itself could not answer.
    fn lookup(&self, username: &str) -> Result<Option<String>, AuthError>;
}

/// In-memory store populated from the `users` table of the configuration
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new<I, U, H>(users: I) -> Self
    where
        I: IntoIterator<Item = (U, H)>,
        U: Into<String>,
        H: Into<String>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(u, h)| (u.into(), h.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for StaticCredentials {
    fn lookup(&self, username: &str) -> Result<Option<String>, AuthError> {
        Ok(self.users.get(username).cloned())
    }
}
