//! Product schema (Thing Specification) display.

use std::collections::HashSet;

use pecron_api::TslProperty;
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SchemaRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    data_type: String,
    #[tabled(rename = "Access")]
    access: String,
    #[tabled(rename = "Writable")]
    writable: String,
}

impl From<&TslProperty> for SchemaRow {
    fn from(p: &TslProperty) -> Self {
        Self {
            code: p.code.clone(),
            name: p.name.clone(),
            data_type: p.data_type.clone(),
            access: p.access_mode.to_string(),
            writable: if p.writable() { "yes".into() } else { String::new() },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::connect(global).await?;
    let devices = util::filter_devices(client.get_devices().await?, global.device.as_deref())?;

    // The schema is per product model, not per device.
    let mut seen = HashSet::new();
    for device in &devices {
        if !seen.insert(device.product_key.clone()) {
            continue;
        }

        let properties = client.get_product_tsl(&device.product_key).await?;

        if !global.quiet && matches!(global.output, OutputFormat::Table) {
            println!("{} ({}):", device.product_name, device.product_key);
        }
        let out = output::render_list(&global.output, &properties, |p| SchemaRow::from(p), |p| {
            p.code.clone()
        });
        output::print_output(&out, global.quiet);
    }
    Ok(())
}
