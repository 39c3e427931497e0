//! Carrier profiles for parcelgate.
//!
//! TOML profiles, secret resolution (env + keyring + plaintext),
//! translation to `parcelgate_core::CarrierConfig`, and write-back of the
//! credentials the gateway issues on registration and subscription.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use parcelgate_api::{TlsMode, TransportConfig};
use parcelgate_core::{
    CarrierConfig, ClientDetail, Credentials, DEFAULT_TRANSACTION_ID, RegistrationResponse,
    SubscriptionResponse,
};

const KEYRING_SERVICE: &str = "parcelgate";

/// Env var consulted for the CSP password when the profile names none.
pub const CSP_PASSWORD_ENV: &str = "PARCELGATE_CSP_PASSWORD";
/// Env var consulted for the user password.
pub const USER_PASSWORD_ENV: &str = "PARCELGATE_USER_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named carrier profiles.
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

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// One FedEx account and the software identity it registers under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// CSP (solution provider) key.
    pub csp_key: String,

    /// CSP password (plaintext; prefer keyring or env var).
    pub csp_password: Option<String>,

    /// Environment variable name containing the CSP password.
    pub csp_password_env: Option<String>,

    pub account_number: Option<String>,

    /// Issued by subscription.
    pub meter_number: Option<String>,

    /// Issued by registration.
    pub user_key: Option<String>,

    /// Issued by registration (plaintext; written here only when the
    /// keyring is unavailable).
    pub user_password: Option<String>,

    pub product_id: Option<String>,
    pub product_version: Option<String>,
    pub region: Option<String>,

    /// `CustomerTransactionId` for rate and tracking requests.
    pub customer_transaction_id: Option<String>,

    /// Use the beta gateway.
    #[serde(default)]
    pub test: bool,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Send every request to this URL instead of the FedEx gateways.
    pub endpoint: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "parcelgate", "parcelgate").map_or_else(
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
    p.push("parcelgate");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file yields the
/// defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PARCELGATE_").split("__"));

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

// ── Secret resolution ───────────────────────────────────────────────

fn keyring_entry(profile_name: &str, secret: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{secret}"))
}

/// Look a secret up in env, then the system keyring, then plaintext.
fn resolve_secret(
    env_name: &str,
    profile_name: &str,
    secret: &str,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    // 1. Env var
    if let Ok(value) = std::env::var(env_name) {
        return Some(SecretString::from(value));
    }

    // 2. System keyring
    if let Ok(value) = keyring_entry(profile_name, secret).and_then(|entry| entry.get_password())
    {
        return Some(SecretString::from(value));
    }

    // 3. Plaintext in config
    plaintext.map(|value| SecretString::from(value.to_owned()))
}

/// Resolve the CSP password. A profile without one cannot talk to the
/// gateway at all.
pub fn resolve_csp_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    let env_name = profile.csp_password_env.as_deref().unwrap_or(CSP_PASSWORD_ENV);
    resolve_secret(
        env_name,
        profile_name,
        "csp-password",
        profile.csp_password.as_deref(),
    )
    .ok_or_else(|| ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve the user password, if registration has issued one.
pub fn resolve_user_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    resolve_secret(
        USER_PASSWORD_ENV,
        profile_name,
        "user-password",
        profile.user_password.as_deref(),
    )
}

/// Store a secret in the system keyring under `<profile>/<secret>`.
pub fn store_secret(profile_name: &str, secret: &str, value: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name, secret)?.set_password(value)?;
    Ok(())
}

// ── Profile → CarrierConfig ─────────────────────────────────────────

/// Build a `CarrierConfig` from a profile.
pub fn profile_to_carrier_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<CarrierConfig, ConfigError> {
    if profile.csp_key.trim().is_empty() {
        return Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
        });
    }

    let credentials = Credentials {
        csp_key: profile.csp_key.clone(),
        csp_password: resolve_csp_password(profile, profile_name)?,
        account_number: profile.account_number.clone(),
        meter_number: profile.meter_number.clone(),
        user_key: profile.user_key.clone(),
        user_password: resolve_user_password(profile, profile_name),
    };

    let client = ClientDetail {
        product_id: profile.product_id.clone(),
        product_version: profile.product_version.clone(),
        region: profile.region.clone(),
    };

    let mut transport = TransportConfig {
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
        ..TransportConfig::default()
    };
    if let Some(ref ca_path) = profile.ca_cert {
        transport.tls = TlsMode::CustomCa(ca_path.clone());
    }
    if let Some(ref endpoint) = profile.endpoint {
        let url: url::Url = endpoint.parse().map_err(|_| ConfigError::Validation {
            field: "endpoint".into(),
            reason: format!("invalid URL: {endpoint}"),
        })?;
        transport = transport.with_endpoint(url);
    }

    let mut config = CarrierConfig::new(credentials)
        .with_client(client)
        .with_test_mode(profile.test)
        .with_transport(transport);
    config.customer_transaction_id = profile
        .customer_transaction_id
        .clone()
        .unwrap_or_else(|| DEFAULT_TRANSACTION_ID.into());
    Ok(config)
}

// ── Issued credentials ──────────────────────────────────────────────

/// Credentials the gateway issued on a successful registration or
/// subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuedCredentials {
    pub user_key: Option<String>,
    pub user_password: Option<String>,
    pub meter_number: Option<String>,
}

impl From<&RegistrationResponse> for IssuedCredentials {
    fn from(response: &RegistrationResponse) -> Self {
        Self {
            user_key: response.user_key.clone(),
            user_password: response.user_password.clone(),
            meter_number: None,
        }
    }
}

impl From<&SubscriptionResponse> for IssuedCredentials {
    fn from(response: &SubscriptionResponse) -> Self {
        Self {
            meter_number: response.meter_number.clone(),
            ..Self::default()
        }
    }
}

/// Where an issued password is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStore {
    /// System keyring, falling back to the config file when unavailable.
    Keyring,
    /// Config file only.
    Plaintext,
}

/// Write issued credentials into `profile`. Returns where the user
/// password ended up, if one was issued.
pub fn record_issued_credentials(
    profile: &mut Profile,
    profile_name: &str,
    issued: &IssuedCredentials,
    store: SecretStore,
) -> Option<SecretStore> {
    if let Some(ref key) = issued.user_key {
        profile.user_key = Some(key.clone());
    }
    if let Some(ref meter) = issued.meter_number {
        profile.meter_number = Some(meter.clone());
    }

    let password = issued.user_password.as_deref()?;
    if store == SecretStore::Keyring {
        match store_secret(profile_name, "user-password", password) {
            Ok(()) => {
                debug!(profile = profile_name, "user password stored in keyring");
                profile.user_password = None;
                return Some(SecretStore::Keyring);
            }
            Err(e) => warn!(
                profile = profile_name,
                error = %e,
                "keyring unavailable, saving user password in config file"
            ),
        }
    }
    profile.user_password = Some(password.to_owned());
    Some(SecretStore::Plaintext)
}
