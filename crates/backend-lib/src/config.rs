// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::collections::BTreeMap;
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

use crate::auth::password::is_supported_hash;
use crate::auth::token::is_hmac;
use crate::auth::{SigningKey, StaticCredentials, TokenPolicy};

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "TOKENGATE_";
/// TOML configuration file looked up in the configuration directory
pub const TOML_FILE: &str = "tokengate.toml";
/// JSON configuration file looked up in the configuration directory
pub const JSON_FILE: &str = "tokengate.json";

/// Accepted log levels
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "warning", "error"];

/// Keys shorter than this are accepted but reported
pub const RECOMMENDED_KEY_BYTES: usize = 32;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Token authentication
    pub auth: AuthSettings,
    /// Credential store: username → PHC password hash
    pub users: BTreeMap<String, String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Token authentication settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// When false every request is authorized
    pub enabled: bool,
    /// Standard base64 signing key
    pub signing_key: Option<String>,
    /// HMAC algorithm (HS256, HS384, HS512)
    pub algorithm: Algorithm,
    /// Token lifetime in minutes
    pub expiration_minutes: u32,
    /// Seconds before expiration from which renewal is allowed
    pub renewal_window_secs: u32,
    /// Seconds after expiration during which renewal is still allowed, the renewal window when unset
    pub renewal_grace_secs: Option<u32>,
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("enabled", &self.enabled)
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .field("expiration_minutes", &self.expiration_minutes)
            .field("renewal_window_secs", &self.renewal_window_secs)
            .field("renewal_grace_secs", &self.renewal_grace_secs)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            auth: AuthSettings::default(),
            users: BTreeMap::new(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            signing_key: None,
            algorithm: Algorithm::HS256,
            expiration_minutes: 15,
            renewal_window_secs: 120,
            renewal_grace_secs: None,
        }
    }
}

impl Settings {
    /// Layered sources: defaults, `tokengate.toml`, `tokengate.json`, then
    /// `TOKENGATE_*` environment variables (`__` separates nested keys).
    pub fn figment(config_dir: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_dir.join(TOML_FILE)))
            .merge(Json::file(config_dir.join(JSON_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate settings from `config_dir`
    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let settings: Settings = Self::figment(config_dir)
            .extract()
            .with_context(|| format!("loading configuration from {}", config_dir.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!("invalid log level '{}'", self.log_level);
        }

        let auth = &self.auth;
        if !is_hmac(auth.algorithm) {
            bail!("auth.algorithm must be HS256, HS384 or HS512, got {:?}", auth.algorithm);
        }
        if auth.expiration_minutes == 0 {
            bail!("auth.expiration_minutes must be greater than zero");
        }
        if u64::from(auth.renewal_window_secs) >= u64::from(auth.expiration_minutes) * 60 {
            bail!(
                "auth.renewal_window_secs ({}) must be shorter than the token lifetime ({} minutes)",
                auth.renewal_window_secs,
                auth.expiration_minutes
            );
        }

        match self.signing_key()? {
            Some(key) if key.is_empty() => bail!("auth.signing_key is empty"),
            Some(_) => {},
            None if auth.enabled => bail!("auth.signing_key is required when auth is enabled"),
            None => {},
        }

        for (username, hash) in &self.users {
            if username.is_empty() {
                bail!("users: empty username");
            }
            if !is_supported_hash(hash) {
                bail!("users.{username}: not a scrypt, argon2 or bcrypt hash");
            }
        }

        Ok(())
    }

    /// Decoded signing key, if one is configured
    pub fn signing_key(&self) -> Result<Option<SigningKey>> {
        self.auth
            .signing_key
            .as_deref()
            .map(SigningKey::from_base64)
            .transpose()
    }

    pub fn token_policy(&self) -> TokenPolicy {
        TokenPolicy::new(self.auth.expiration_minutes, self.auth.renewal_window_secs)
            .with_renewal_grace(self.auth.renewal_grace_secs)
    }

    pub fn credentials(&self) -> StaticCredentials {
        StaticCredentials::new(self.users.clone())
    }
}
