//! Shared configuration for Porkbun tools.
//!
//! TOML profiles, credential resolution (flag + env + keyring + plaintext),
//! and translation into a ready-to-use [`PorkbunClient`]. The CLI layers
//! its flag parsing on top; the resolution chain itself lives here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use porkbun_api::{Credentials, DEFAULT_BASE_URL, PorkbunClient, TransportConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Keyring service name for stored secrets.
pub const KEYRING_SERVICE: &str = "porkbun";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {secret} configured for profile '{profile}'")]
    NoCredentials { profile: String, secret: SecretKind },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to build API client: {0}")]
    Client(#[from] porkbun_api::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}

/// A named Porkbun account profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API key (plaintext -- prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Secret API key (plaintext -- prefer keyring or env var).
    pub secret_api_key: Option<String>,

    /// Environment variable name containing the secret API key.
    pub secret_api_key_env: Option<String>,

    /// Look secrets up in the system keyring.
    #[serde(default = "default_true")]
    pub use_keyring: bool,

    /// Override the API root (e.g. a staging proxy).
    pub base_url: Option<String>,

    /// Override the request timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: None,
            secret_api_key: None,
            secret_api_key_env: None,
            use_keyring: true,
            base_url: None,
            timeout: None,
        }
    }
}

/// Which half of the key pair a lookup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    ApiKey,
    SecretApiKey,
}

impl SecretKind {
    /// Suffix of the keyring entry: `{profile}/{suffix}`.
    pub fn keyring_suffix(self) -> &'static str {
        match self {
            Self::ApiKey => "api-key",
            Self::SecretApiKey => "secret-api-key",
        }
    }

    fn profile_env<'a>(self, profile: &'a Profile) -> Option<&'a str> {
        match self {
            Self::ApiKey => profile.api_key_env.as_deref(),
            Self::SecretApiKey => profile.secret_api_key_env.as_deref(),
        }
    }

    fn profile_plaintext(self, profile: &Profile) -> Option<&str> {
        match self {
            Self::ApiKey => profile.api_key.as_deref(),
            Self::SecretApiKey => profile.secret_api_key.as_deref(),
        }
    }
}

impl std::fmt::Display for SecretKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ApiKey => "API key",
            Self::SecretApiKey => "secret API key",
        })
    }
}

/// Values that outrank everything in the config file (CLI flags, and
/// the `PORKBUN_API_KEY` / `PORKBUN_SECRET_API_KEY` env vars clap maps
/// onto them).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub secret_api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "porkbun", "porkbun").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("porkbun");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file. `PORKBUN_` variables with `__` as the
/// nesting separator override file values (`PORKBUN_DEFAULTS__TIMEOUT=10`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PORKBUN_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve one secret through the chain:
/// override → profile's env var → keyring → plaintext in profile.
pub fn resolve_secret(
    kind: SecretKind,
    profile: &Profile,
    profile_name: &str,
    override_value: Option<&str>,
) -> Result<SecretString, ConfigError> {
    // 1. Flag / well-known env var
    if let Some(value) = override_value.filter(|v| !v.is_empty()) {
        return Ok(SecretString::from(value.to_owned()));
    }

    // 2. Profile's named env var
    if let Some(env_name) = kind.profile_env(profile) {
        if let Ok(value) = std::env::var(env_name) {
            return Ok(SecretString::from(value));
        }
    }

    // 3. System keyring
    if profile.use_keyring {
        let user = format!("{profile_name}/{}", kind.keyring_suffix());
        match keyring::Entry::new(KEYRING_SERVICE, &user).and_then(|e| e.get_password()) {
            Ok(secret) => return Ok(SecretString::from(secret)),
            Err(e) => debug!(%user, error = %e, "keyring lookup failed"),
        }
    }

    // 4. Plaintext in config
    if let Some(value) = kind.profile_plaintext(profile).filter(|v| !v.is_empty()) {
        return Ok(SecretString::from(value.to_owned()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
        secret: kind,
    })
}

/// Resolve both halves of the key pair.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    overrides: &Overrides,
) -> Result<Credentials, ConfigError> {
    let api_key = resolve_secret(
        SecretKind::ApiKey,
        profile,
        profile_name,
        overrides.api_key.as_deref(),
    )?;
    let secret_api_key = resolve_secret(
        SecretKind::SecretApiKey,
        profile,
        profile_name,
        overrides.secret_api_key.as_deref(),
    )?;
    Ok(Credentials::new(api_key, secret_api_key))
}

/// Store a secret in the system keyring for later resolution.
pub fn store_secret(profile_name: &str, kind: SecretKind, value: &str) -> Result<(), ConfigError> {
    let user = format!("{profile_name}/{}", kind.keyring_suffix());
    keyring::Entry::new(KEYRING_SERVICE, &user)?.set_password(value)?;
    Ok(())
}

// ── Client construction ─────────────────────────────────────────────

/// Everything needed to build a client, after resolution.
#[derive(Debug)]
pub struct ClientSettings {
    pub credentials: Credentials,
    pub base_url: String,
    pub transport: TransportConfig,
}

impl ClientSettings {
    pub fn build_client(&self) -> Result<PorkbunClient, ConfigError> {
        Ok(PorkbunClient::from_config(
            self.credentials.clone(),
            &self.base_url,
            &self.transport,
        )?)
    }
}

/// Translate a profile + overrides into [`ClientSettings`].
///
/// Overrides win over the profile, the profile wins over `[defaults]`.
pub fn resolve_settings(
    config: &Config,
    profile: &Profile,
    profile_name: &str,
    overrides: &Overrides,
) -> Result<ClientSettings, ConfigError> {
    let base_url = overrides
        .base_url
        .clone()
        .or_else(|| profile.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    url::Url::parse(&base_url).map_err(|e| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("{base_url}: {e}"),
    })?;

    let credentials = resolve_credentials(profile, profile_name, overrides)?;

    let timeout = overrides
        .timeout
        .or(profile.timeout)
        .or(config.defaults.timeout);
    let mut transport = TransportConfig::default();
    if let Some(secs) = timeout {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }

    Ok(ClientSettings {
        credentials,
        base_url,
        transport,
    })
}
