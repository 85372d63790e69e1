//! Loading settings from real configuration directories.
mod common;

use std::fs;

use backend_lib::{
    auth::{hash_password_with, CredentialStore},
    config::{LogFormat, Settings},
    AppState,
};
use jsonwebtoken::Algorithm;

use common::{cheap_params, SIGNING_KEY};

/// bcrypt (cost 4) of "legacy-secret"
const BCRYPT_HASH: &str = "$2b$04$abcdefghijklmnopqrstuuX8rXea.4iBVJaHhaMP3aEdgDj2opAzO";

#[test]
fn test_load_toml_directory() {
    let dir = tempfile::tempdir().unwrap();
    let hash = hash_password_with("Wonderland-42!", cheap_params()).unwrap();
    fs::write(
        dir.path().join("tokengate.toml"),
        format!(
            r#"
bind_addr = "0.0.0.0:9443"
log_level = "debug"
log_format = "json"

[auth]
signing_key = "{SIGNING_KEY}"
algorithm = "HS512"
expiration_minutes = 30
renewal_window_secs = 300

[users]
alice = "{hash}"
"#
        ),
    )
    .unwrap();

    let settings = Settings::load_from(dir.path()).unwrap();
    assert_eq!(settings.bind_addr.port(), 9443);
    assert_eq!(settings.log_format, LogFormat::Json);
    assert_eq!(settings.auth.algorithm, Algorithm::HS512);
    assert_eq!(settings.auth.expiration_minutes, 30);
    assert_eq!(settings.auth.renewal_window_secs, 300);

    let store = settings.credentials();
    assert_eq!(store.lookup("alice").unwrap(), Some(hash));
    assert!(AppState::new(settings).is_ok());
}

#[test]
fn test_json_overrides_toml() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tokengate.toml"),
        format!("[auth]\nsigning_key = \"{SIGNING_KEY}\"\nexpiration_minutes = 30\n"),
    )
    .unwrap();
    fs::write(
        dir.path().join("tokengate.json"),
        r#"{"auth": {"expiration_minutes": 60}}"#,
    )
    .unwrap();

    let settings = Settings::load_from(dir.path()).unwrap();
    assert_eq!(settings.auth.expiration_minutes, 60);
    assert!(settings.auth.signing_key.is_some());
}

#[test]
fn test_rejects_unusable_files() {
    // enabled auth with no key
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tokengate.toml"), "[auth]\nenabled = true\n").unwrap();
    assert!(Settings::load_from(dir.path()).is_err());

    // truncated bcrypt hash
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tokengate.toml"),
        format!("[auth]\nsigning_key = \"{SIGNING_KEY}\"\n\n[users]\nbob = \"$2b$10$N9qo8uLO\"\n"),
    )
    .unwrap();
    assert!(Settings::load_from(dir.path()).is_err());

    // plaintext password
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tokengate.toml"),
        format!("[auth]\nsigning_key = \"{SIGNING_KEY}\"\n\n[users]\nbob = \"hunter2\"\n"),
    )
    .unwrap();
    assert!(Settings::load_from(dir.path()).is_err());

    // unparsable
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tokengate.toml"), "auth = [").unwrap();
    assert!(Settings::load_from(dir.path()).is_err());
}

#[test]
fn test_existing_bcrypt_user_table_loads() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tokengate.toml"),
        format!(
            "[auth]\nsigning_key = \"{SIGNING_KEY}\"\n\n[users]\nbob = \"{BCRYPT_HASH}\"\n"
        ),
    )
    .unwrap();

    let settings = Settings::load_from(dir.path()).unwrap();
    let state = AppState::new(settings).unwrap();
    let issued = state.issuer.login("bob", "legacy-secret").unwrap();
    assert_eq!(issued.claims.username, "bob");
    assert!(state.issuer.login("bob", "wrong").is_err());
}

#[test]
fn test_empty_directory_needs_a_key() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Settings::load_from(dir.path()).is_err());
}
