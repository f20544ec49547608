//! Raw business-attribute dump, keyed by device name.

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::connect(global).await?;
    let devices = util::filter_devices(client.get_devices().await?, global.device.as_deref())?;

    let mut all = serde_json::Map::new();
    for device in &devices {
        let entry = match client.get_device_business_attributes(device).await {
            Ok(data) => data,
            Err(err) => serde_json::json!({ "error": err.to_string() }),
        };
        all.insert(device.device_name.clone(), entry);
    }

    let out = match global.output {
        OutputFormat::JsonCompact => output::render_json_compact(&all),
        OutputFormat::Yaml => output::render_yaml(&all),
        // raw data has no table/plain shape; default to pretty JSON
        _ => output::render_json_pretty(&all),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
