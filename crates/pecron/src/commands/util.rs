//! Shared helpers for command handlers.

use pecron_api::Device;

use crate::error::CliError;

/// Filter devices by case-insensitive substring match on the display name.
///
/// An empty match against a non-empty filter is an error listing the
/// available device names; no filter passes everything through.
pub fn filter_devices(
    devices: Vec<Device>,
    filter: Option<&str>,
) -> Result<Vec<Device>, CliError> {
    let Some(filter) = filter else {
        return Ok(devices);
    };
    let needle = filter.to_lowercase();
    let available = devices
        .iter()
        .map(|d| d.device_name.clone())
        .collect::<Vec<_>>()
        .join(", ");

    let matched: Vec<Device> = devices
        .into_iter()
        .filter(|d| d.device_name.to_lowercase().contains(&needle))
        .collect();

    if matched.is_empty() {
        return Err(CliError::NoDeviceMatch {
            filter: filter.to_owned(),
            available,
        });
    }
    Ok(matched)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}
