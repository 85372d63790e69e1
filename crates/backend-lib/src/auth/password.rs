// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Stored hashes are PHC strings (`$scrypt$...` or `$argon2id$...`) or
//! modular-crypt bcrypt strings (`$2b$...`). New hashes are produced with
//! scrypt; argon2 and bcrypt hashes written by other tooling are accepted on
//! verification.
use argon2::Argon2;
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};
use zeroize::Zeroize;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// Modular-crypt prefixes of bcrypt hashes
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Length of a complete bcrypt hash string
const BCRYPT_HASH_LEN: usize = 60;

fn is_bcrypt(hash: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
}

/// Password complexity requirements
pub struct PasswordRequirements {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

/// Hash a password using scrypt with the recommended cost
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    hash_password_with(plain, Params::recommended())
}

/// Hash a password using scrypt with explicit cost parameters
pub fn hash_password_with(plain: &str, params: Params) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)?
        .to_string();
    Ok(hash)
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String) -> anyhow::Result<String> {
    let hash = hash_password(plain);
    plain.zeroize();
    hash
}

/// Verify a password against a stored hash.
///
/// A hash that does not parse, or names an algorithm other than scrypt,
/// argon2 or bcrypt, never verifies.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    if is_bcrypt(hash) {
        return bcrypt::verify(plain, hash).unwrap_or(false);
    }

    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    let argon2 = Argon2::default();
    let verifiers: [&dyn PasswordVerifier; 2] = [&Scrypt, &argon2];
    parsed_hash.verify_password(&verifiers, plain).is_ok()
}

/// Whether `hash` is a stored hash this module can verify against
pub fn is_supported_hash(hash: &str) -> bool {
    if is_bcrypt(hash) {
        return hash.len() == BCRYPT_HASH_LEN;
    }

    match PasswordHash::new(hash) {
        Ok(parsed) => matches!(
            parsed.algorithm.as_str(),
            "scrypt" | "argon2id" | "argon2i" | "argon2d"
        ),
        Err(_) => false,
    }
}

/// Check if a password meets the complexity requirements
pub fn validate_password_strength(password: &str, requirements: &PasswordRequirements) -> bool {
    if password.len() < requirements.min_length {
        return false;
    }

    if requirements.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
        return false;
    }

    if requirements.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
        return false;
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    if requirements.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        return false;
    }

    true
}

/// Cheap scrypt cost, only suitable for tests
#[cfg(test)]
pub(crate) fn test_params() -> Params {
    Params::new(4, 8, 1, Params::RECOMMENDED_LEN).unwrap()
}
