//! Config subcommand handlers.

use dialoguer::Password;
use porkbun_config::{Profile, SecretKind};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, SecretTarget};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    if let Some(timeout) = cfg.defaults.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        format_profile(&mut out, &cfg.profiles[name]);
    }

    out
}

fn format_profile(out: &mut String, p: &Profile) {
    use std::fmt::Write;
    if p.api_key.is_some() {
        let _ = writeln!(out, "api_key = \"****\"");
    }
    if let Some(ref env) = p.api_key_env {
        let _ = writeln!(out, "api_key_env = \"{env}\"");
    }
    if p.secret_api_key.is_some() {
        let _ = writeln!(out, "secret_api_key = \"****\"");
    }
    if let Some(ref env) = p.secret_api_key_env {
        let _ = writeln!(out, "secret_api_key_env = \"{env}\"");
    }
    let _ = writeln!(out, "use_keyring = {}", p.use_keyring);
    if let Some(ref url) = p.base_url {
        let _ = writeln!(out, "base_url = \"{url}\"");
    }
    if let Some(timeout) = p.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }
}

impl From<SecretTarget> for SecretKind {
    fn from(target: SecretTarget) -> Self {
        match target {
            SecretTarget::ApiKey => Self::ApiKey,
            SecretTarget::SecretApiKey => Self::SecretApiKey,
        }
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        ConfigCommand::SetSecret { which, value } => {
            let kind = SecretKind::from(which);
            let value = match value {
                Some(v) => v,
                None => Password::new()
                    .with_prompt(kind.to_string())
                    .interact()
                    .map_err(prompt_err)?,
            };
            if value.is_empty() {
                return Err(CliError::Validation {
                    field: kind.keyring_suffix().into(),
                    reason: "cannot be empty".into(),
                });
            }

            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            porkbun_config::store_secret(&profile_name, kind, &value)?;

            // Make sure the profile exists and consults the keyring.
            cfg.profiles
                .entry(profile_name.clone())
                .or_default()
                .use_keyring = true;
            config::save_config(&cfg)?;

            output::print_status(
                &format!("Stored {kind} for profile '{profile_name}' in the system keyring"),
                global.quiet,
            );
            Ok(())
        }
    }
}
