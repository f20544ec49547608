//! Device listing.

use pecron_api::Device;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "PK")]
    product_key: String,
    #[tabled(rename = "DK")]
    device_key: String,
    #[tabled(rename = "Signal")]
    signal: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.device_name.clone(),
            product: d.product_name.clone(),
            status: if d.online { "Online".into() } else { "Offline".into() },
            product_key: d.product_key.clone(),
            device_key: d.device_key.clone(),
            signal: d
                .signal_strength
                .map(|s| format!("{s} dBm"))
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::connect(global).await?;
    let devices = util::filter_devices(client.get_devices().await?, global.device.as_deref())?;

    if devices.is_empty() {
        if !global.quiet {
            eprintln!("No devices found.");
        }
        return Ok(());
    }

    let out = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| {
        d.device_name.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
