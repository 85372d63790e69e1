// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.
//!
//! Leaf-first: [`password`] and [`credentials`] feed the
//! [`CredentialVerifier`], [`TokenCodec`] signs [`Claims`], the
//! [`SessionIssuer`] mints tokens and the [`AuthGate`] checks them.

pub mod claims;
pub mod clock;
pub mod credentials;
pub mod gate;
pub mod issuer;
pub mod password;
pub mod token;
pub mod token_generator;
pub mod verifier;

pub use claims::Claims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::{CredentialStore, StaticCredentials};
pub use gate::{parse_bearer, AuthGate, Authorized};
pub use issuer::{IssuedToken, SessionIssuer, TokenPolicy};
pub use password::{
    hash_password, hash_password_with, validate_password_strength, verify_password,
    PasswordRequirements, MIN_PASSWORD_LENGTH,
};
pub use token::{SigningKey, TokenCodec};
pub use verifier::CredentialVerifier;
