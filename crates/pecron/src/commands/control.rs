//! Device control commands.
//!
//! Encodes a property assignment, confirms it (unless `--yes`), and
//! submits it per matched device. A rejection for one device is reported
//! and does not abort the remaining devices; any failure makes the
//! command exit non-zero.

use serde_json::Value;

use pecron_api::PropertyValues;

use crate::cli::{GlobalOpts, SetArgs, SetCommand, SwitchState};
use crate::error::CliError;

use super::util;

pub async fn handle(args: SetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (label, properties) = match args.command {
        SetCommand::Ac { state } => (
            format!("AC output {}", state_label(state)),
            single("ac_switch_hm", Value::Bool(state.as_bool())),
        ),
        SetCommand::Dc { state } => (
            format!("DC output {}", state_label(state)),
            single("dc_switch_hm", Value::Bool(state.as_bool())),
        ),
        SetCommand::Prop { code, value } => {
            let value = parse_value(&value);
            let label = format!("{code} = {value}");
            (label, single(&code, value))
        }
    };

    let client = super::connect(global).await?;
    let devices = util::filter_devices(client.get_devices().await?, global.device.as_deref())?;

    let mut failures = Vec::new();
    for device in &devices {
        if !util::confirm(
            &format!("Set {label} on '{}'?", device.device_name),
            global.yes,
        )? {
            continue;
        }

        match client.set_device_property(device, &properties).await {
            Ok(result) if result.success => {
                if !global.quiet {
                    let ticket = result.ticket.as_deref().unwrap_or("-");
                    eprintln!("{}: command accepted (ticket {ticket})", device.device_name);
                }
            }
            Ok(result) => {
                let message = result
                    .error_message
                    .unwrap_or_else(|| "unknown failure".to_owned());
                eprintln!("{}: command rejected: {message}", device.device_name);
                failures.push(device.device_name.clone());
            }
            Err(err) => {
                eprintln!("{}: {err}", device.device_name);
                failures.push(device.device_name.clone());
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::CommandRejected {
            message: format!("command failed for: {}", failures.join(", ")),
        })
    }
}

fn state_label(state: SwitchState) -> &'static str {
    if state.as_bool() { "on" } else { "off" }
}

fn single(code: &str, value: Value) -> PropertyValues {
    let mut properties = PropertyValues::new();
    properties.insert(code.to_owned(), value);
    properties
}

/// Parse a value argument as JSON when possible, falling back to a bare
/// string. `true`, `42`, and `"text"` all do what they look like.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}
