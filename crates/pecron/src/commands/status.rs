//! Device status report.
//!
//! Fetches and prints per-device telemetry. A fetch failure for one device
//! is reported on stderr and never aborts the remaining devices.

use owo_colors::OwoColorize;
use pecron_api::{Device, DeviceProperties};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

/// Structured status entry for json/yaml/plain output.
#[derive(Serialize)]
struct StatusEntry {
    device: String,
    product: String,
    online: bool,
    firmware: Option<String>,
    #[serde(flatten)]
    properties: DeviceProperties,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::connect(global).await?;
    let devices = util::filter_devices(client.get_devices().await?, global.device.as_deref())?;

    let use_color = output::should_color(&global.color);
    let mut entries = Vec::new();

    for mut device in devices {
        let attrs = match client.get_device_properties(&device).await {
            Ok(attrs) => attrs,
            Err(err) => {
                eprintln!("Error fetching {}: {err}", device.device_name);
                continue;
            }
        };
        if let Some(firmware) = &attrs.firmware {
            device.apply_firmware(firmware);
        }

        if matches!(global.output, OutputFormat::Table) {
            print_device_status(&device, &attrs.properties, use_color);
        } else {
            entries.push(StatusEntry {
                device: device.device_name.clone(),
                product: device.product_name.clone(),
                online: device.online,
                firmware: device.firmware_version.clone(),
                properties: attrs.properties,
            });
        }
    }

    if !matches!(global.output, OutputFormat::Table) {
        let out = match global.output {
            OutputFormat::JsonCompact => output::render_json_compact(&entries),
            OutputFormat::Yaml => output::render_yaml(&entries),
            OutputFormat::Plain => entries
                .iter()
                .map(|e| {
                    let battery = e
                        .properties
                        .battery_percentage
                        .map_or_else(|| "-".to_owned(), |b| b.to_string());
                    format!("{}\t{battery}", e.device)
                })
                .collect::<Vec<_>>()
                .join("\n"),
            _ => output::render_json_pretty(&entries),
        };
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

// ── Report rendering ────────────────────────────────────────────────

fn print_device_status(device: &Device, props: &DeviceProperties, use_color: bool) {
    let status = online_label(device.online, use_color);
    println!("  {} ({}) [{status}]", device.device_name, device.product_name);

    if let Some(firmware) = &device.firmware_version {
        println!("    Firmware:       {firmware}");
    }

    if let Some(pct) = props.battery_percentage {
        println!("    Battery:        {} {pct}%", battery_bar(pct, use_color));
    }
    if let Some(watts) = props.total_input_power {
        println!("    Input Power:    {watts} W");
    }
    if let Some(watts) = props.total_output_power {
        println!("    Output Power:   {watts} W");
    }

    let mut switches = Vec::new();
    if let Some(on) = props.ac_switch {
        switches.push(format!("AC={}", on_off(on)));
    }
    if let Some(on) = props.dc_switch {
        switches.push(format!("DC={}", on_off(on)));
    }
    if let Some(on) = props.ups_status {
        switches.push(format!("UPS={}", on_off(on)));
    }
    if !switches.is_empty() {
        println!("    Switches:       {}", switches.join(", "));
    }

    if let Some(minutes) = props.remain_charging_time.filter(|m| *m > 0) {
        println!("    Time to Full:   {}", format_minutes(minutes));
    }
    if let Some(minutes) = props.remain_discharging_time.filter(|m| *m > 0) {
        println!("    Time to Empty:  {}", format_minutes(minutes));
    }

    if let Some(ac) = &props.ac_output {
        println!(
            "    AC Output:      {} W @ {} V / {} Hz",
            field(ac, "ac_output_power"),
            field(ac, "ac_output_voltage"),
            field(ac, "ac_output_hz")
        );
    }
    if let Some(dc) = &props.dc_output {
        println!("    DC Output:      {} W", field(dc, "dc_output_power"));
    }
    if let Some(ac) = &props.ac_input {
        println!("    AC Input:       {} W", field(ac, "ac_power"));
    }
    if let Some(dc) = &props.dc_input {
        println!("    DC/PV Input:    {} W", field(dc, "dc_input_power"));
    }

    println!();
}

fn online_label(online: bool, use_color: bool) -> String {
    match (online, use_color) {
        (true, true) => "Online".green().to_string(),
        (true, false) => "Online".to_owned(),
        (false, true) => "Offline".red().to_string(),
        (false, false) => "Offline".to_owned(),
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

fn format_minutes(minutes: i64) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Struct sub-fields arrive as JSON values (usually strings); render
/// strings bare and anything else via its JSON form.
fn field(map: &serde_json::Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "?".to_owned(),
    }
}

/// Render a small battery bar like `[||||||||............]`, colored by
/// charge level.
fn battery_bar(pct: i64, use_color: bool) -> String {
    const WIDTH: i64 = 20;
    let filled = (pct.clamp(0, 100) * WIDTH + 50) / 100;
    let filled = usize::try_from(filled).unwrap_or_default();
    let empty = usize::try_from(WIDTH).unwrap_or_default() - filled;

    let bar = "|".repeat(filled);
    let bar = if !use_color {
        bar
    } else if pct > 50 {
        bar.green().to_string()
    } else if pct > 20 {
        bar.yellow().to_string()
    } else {
        bar.red().to_string()
    };
    format!("[{bar}{}]", ".".repeat(empty))
}
