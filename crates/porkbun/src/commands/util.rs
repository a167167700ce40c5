//! Shared helpers for command handlers.

use std::io::IsTerminal;

use crate::error::{CliError, is_not_found};

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the command fails
/// instead of hanging.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Apply `--ignore-missing` to a delete result.
///
/// Returns `Ok(true)` if the delete happened, `Ok(false)` if the target
/// was already gone and that is acceptable.
pub fn tolerate_missing(
    result: Result<(), porkbun_api::Error>,
    ignore_missing: bool,
) -> Result<bool, porkbun_api::Error> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if ignore_missing && is_not_found(&e) => {
            tracing::debug!(error = %e, "target already gone");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Render an optional field for table cells.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => "-".into(),
    }
}
