//! CLI glue over `porkbun-config`: profile selection and flag overrides.
//!
//! The resolution chain lives in the shared crate; this module only
//! decides which profile applies and turns global flags into overrides.

pub use porkbun_config::{Config, config_path, load_config_or_default, save_config};

use porkbun_api::PorkbunClient;
use porkbun_config::{Overrides, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Pick the profile name: `--profile` flag, then `default_profile`, then "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Global flags that outrank the config file.
pub fn overrides(global: &GlobalOpts) -> Overrides {
    Overrides {
        api_key: global.api_key.clone(),
        secret_api_key: global.secret_api_key.clone(),
        base_url: global.base_url.clone(),
        timeout: global.timeout,
    }
}

/// Look up the active profile.
///
/// An explicitly requested profile must exist. Without `--profile`, a
/// missing entry falls back to an empty profile so flags and the
/// `PORKBUN_*` environment alone are enough.
pub fn active_profile(global: &GlobalOpts, cfg: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, cfg);
    match cfg.profiles.get(&name) {
        Some(profile) => Ok((name, profile.clone())),
        None if global.profile.is_some() => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            })
        }
        None => Ok((name, Profile::default())),
    }
}

/// Build a client from the config file, active profile, and CLI overrides.
pub fn build_client(global: &GlobalOpts) -> Result<PorkbunClient, CliError> {
    let cfg = load_config_or_default();
    let (name, profile) = active_profile(global, &cfg)?;
    let settings = porkbun_config::resolve_settings(&cfg, &profile, &name, &overrides(global))?;
    tracing::debug!(profile = %name, base_url = %settings.base_url, "resolved client settings");
    Ok(settings.build_client()?)
}
