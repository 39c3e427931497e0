//! CLI configuration: thin wrapper around `parcelgate_config`.
//!
//! Adds profile selection from `GlobalOpts` and the flag overrides
//! (`--test`, `--timeout`) on top of the shared resolution.

use std::time::Duration;

use parcelgate_config::{IssuedCredentials, SecretStore};
use parcelgate_core::CarrierConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use parcelgate_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The profile a carrier command runs against.
#[derive(Debug)]
pub struct ActiveProfile {
    pub name: String,
    pub carrier: CarrierConfig,
}

/// Load the active profile and translate it into a `CarrierConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(global: &GlobalOpts) -> Result<ActiveProfile, CliError> {
    let cfg = parcelgate_config::load_config()?;
    let name = active_profile_name(global, &cfg);

    let Some(profile) = cfg.profiles.get(&name) else {
        if cfg.profiles.is_empty() {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
        return Err(CliError::ProfileNotFound {
            available: profile_names(&cfg).join(", "),
            name,
        });
    };

    let mut carrier = parcelgate_config::profile_to_carrier_config(profile, &name)?;
    if global.test {
        carrier.test_mode = true;
    }
    if let Some(timeout) = global.timeout {
        carrier.transport.timeout = Duration::from_secs(timeout);
    }

    Ok(ActiveProfile { name, carrier })
}

/// Sorted profile names.
pub fn profile_names(cfg: &Config) -> Vec<String> {
    let mut names: Vec<String> = cfg.profiles.keys().cloned().collect();
    names.sort();
    names
}

/// Write credentials issued by the gateway into the named profile and save
/// the config file.
pub fn persist_issued(
    profile_name: &str,
    issued: &IssuedCredentials,
) -> Result<Option<SecretStore>, CliError> {
    let mut cfg = parcelgate_config::load_config()?;
    let profile: &mut Profile =
        cfg.profiles
            .get_mut(profile_name)
            .ok_or_else(|| CliError::ProfileNotFound {
                name: profile_name.into(),
                available: String::new(),
            })?;

    let stored = parcelgate_config::record_issued_credentials(
        profile,
        profile_name,
        issued,
        SecretStore::Keyring,
    );
    save_config(&cfg)?;
    Ok(stored)
}
