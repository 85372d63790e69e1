// ============================
// crates/backend-lib/src/auth/token_generator.rs
// ============================
use base64::{engine::general_purpose::STANDARD, Engine as _};
/** Signing key generation
This module produces random symmetric keys for token signing, either to
print for an operator (`gen-key`) or as an ephemeral key at startup. */
use rand::RngCore;

use super::token::SigningKey;

/// Default key size in bytes (64 bytes = the HS512 block size)
pub const DEFAULT_KEY_BYTES: usize = 64;

/** Generate a random signing key with the default size
# Returns
A key backed by thread-local CSPRNG output */
pub fn generate_signing_key() -> SigningKey {
    generate_signing_key_with_size(DEFAULT_KEY_BYTES)
}

/** Generate a random signing key with specified size
# Arguments
* `bytes` - The size of the key in bytes */
pub fn generate_signing_key_with_size(bytes: usize) -> SigningKey {
    let mut buffer = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buffer);
    SigningKey::new(buffer)
}

/** Generate a random key in the base64 form the configuration expects
# Returns
A standard base64 encoded string with padding */
pub fn generate_encoded_key() -> String {
    STANDARD.encode(generate_signing_key().as_bytes())
}
