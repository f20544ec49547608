// Wire models and the property codec
//
// Models for the cloud API's JSON payloads. Fields use `#[serde(default)]`
// liberally and carry a flattened `extra` catch-all because the upstream
// API is inconsistent about field presence across firmware versions.
//
// Every telemetry value arrives string-typed regardless of its declared
// data type (a quirk of the upstream protocol), so the raw record keeps a
// `String` value and typed parsing happens only in
// `DeviceProperties::from_records`. A value that fails to parse leaves its
// field unset -- it never aborts decoding of the remaining records.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::Display;

// ── Device ───────────────────────────────────────────────────────────

/// A bound device from `userDeviceList`.
///
/// Identity is the `(product_key, device_key)` pair; `device_name` is a
/// display label with no uniqueness guarantee. Firmware fields start empty
/// and are filled by merging a [`FirmwareInfo`] fragment returned from a
/// property fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default = "default_device_name")]
    pub device_name: String,
    #[serde(default)]
    pub product_key: String,
    #[serde(default)]
    pub device_key: String,
    #[serde(default)]
    pub product_name: String,
    /// Upstream sends `onlineStatus: 1` for online, anything else for offline.
    #[serde(
        rename = "onlineStatus",
        default,
        deserialize_with = "online_from_status"
    )]
    pub online: bool,
    #[serde(default)]
    pub protocol: String,
    #[serde(default, rename = "sn")]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub signal_strength: Option<i32>,
    #[serde(default)]
    pub last_conn_time: Option<String>,
    #[serde(skip)]
    pub firmware_version: Option<String>,
    #[serde(skip)]
    pub mcu_version: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn default_device_name() -> String {
    "Unknown".to_owned()
}

fn online_from_status<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let status = Value::deserialize(deserializer)?;
    Ok(status.as_i64() == Some(1))
}

impl Device {
    /// Merge a firmware fragment returned by a property fetch.
    pub fn apply_firmware(&mut self, info: &FirmwareInfo) {
        if let Some(version) = &info.version {
            self.firmware_version = Some(version.clone());
        }
        if let Some(mcu) = &info.mcu_version {
            self.mcu_version = Some(mcu.clone());
        }
    }
}

/// Firmware/MCU version fragment from the `deviceData` sub-object of a
/// business-attribute fetch. Returned to the caller for an explicit merge
/// rather than written through the device handle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareInfo {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub mcu_version: Option<String>,
}

impl FirmwareInfo {
    /// `true` when the fragment carries no version at all.
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.mcu_version.is_none()
    }
}

// ── Property records ─────────────────────────────────────────────────

/// One raw telemetry triple from `customizeTslInfo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(default)]
    pub resource_code: String,
    /// `resourceValce` is the field name upstream actually sends.
    #[serde(default, rename = "resourceValce")]
    pub resource_value: String,
    #[serde(default)]
    pub data_type: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Decoded device state.
///
/// Known resource codes:
///   - `battery_percentage` (INT): battery level 0-100
///   - `total_input_power` / `total_output_power` (INT): watts
///   - `ac_switch_hm` / `dc_switch_hm` (BOOL): output switches
///   - `ups_status_hm` (BOOL): UPS mode active
///   - `remain_charging_time` (INT): minutes until fully charged
///   - `remain_time` (INT): minutes of discharge remaining
///   - `ac_data_output_hm` / `dc_data_output_hm` /
///     `ac_data_input_hm` / `dc_data_input_hm` (STRUCT): nested
///     JSON-in-string measurement groups
///
/// A field stays `None` when its record is absent or its value does not
/// parse as the declared type; it never defaults to zero or false. The
/// full record sequence is retained for [`lookup`](Self::lookup).
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceProperties {
    pub battery_percentage: Option<i64>,
    pub total_input_power: Option<i64>,
    pub total_output_power: Option<i64>,
    pub ac_switch: Option<bool>,
    pub dc_switch: Option<bool>,
    pub ups_status: Option<bool>,
    pub remain_charging_time: Option<i64>,
    pub remain_discharging_time: Option<i64>,
    pub ac_output: Option<serde_json::Map<String, Value>>,
    pub dc_output: Option<serde_json::Map<String, Value>>,
    pub ac_input: Option<serde_json::Map<String, Value>>,
    pub dc_input: Option<serde_json::Map<String, Value>>,
    #[serde(skip)]
    raw: Vec<PropertyRecord>,
}

impl DeviceProperties {
    /// Decode a raw record sequence into typed state.
    pub fn from_records(records: Vec<PropertyRecord>) -> Self {
        let mut props = Self::default();
        for record in &records {
            props.apply(record);
        }
        props.raw = records;
        props
    }

    /// Apply one record by resource code. Unrecognized codes are left to
    /// the raw sequence; parse failures leave the field unset.
    fn apply(&mut self, record: &PropertyRecord) {
        let value = record.resource_value.as_str();
        match record.resource_code.as_str() {
            "battery_percentage" => self.battery_percentage = parse_int(value),
            "total_input_power" => self.total_input_power = parse_int(value),
            "total_output_power" => self.total_output_power = parse_int(value),
            "ac_switch_hm" => self.ac_switch = Some(parse_bool(value)),
            "dc_switch_hm" => self.dc_switch = Some(parse_bool(value)),
            "ups_status_hm" => self.ups_status = Some(parse_bool(value)),
            "remain_charging_time" => self.remain_charging_time = parse_int(value),
            "remain_time" => self.remain_discharging_time = parse_int(value),
            "ac_data_output_hm" => self.ac_output = parse_struct(record),
            "dc_data_output_hm" => self.dc_output = parse_struct(record),
            "ac_data_input_hm" => self.ac_input = parse_struct(record),
            "dc_data_input_hm" => self.dc_input = parse_struct(record),
            _ => {}
        }
    }

    /// Look up any property's raw string value by resource code.
    ///
    /// Scans the retained record sequence in order and returns the first
    /// match, including codes the typed decoder does not recognize.
    pub fn lookup(&self, resource_code: &str) -> Option<&str> {
        self.raw
            .iter()
            .find(|record| record.resource_code == resource_code)
            .map(|record| record.resource_value.as_str())
    }

    /// The full raw record sequence, exactly as received.
    pub fn raw(&self) -> &[PropertyRecord] {
        &self.raw
    }
}

fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Decode a STRUCT record's JSON-in-string payload. Records declared as
/// anything other than STRUCT are not interpreted.
fn parse_struct(record: &PropertyRecord) -> Option<serde_json::Map<String, Value>> {
    if record.data_type != "STRUCT" {
        return None;
    }
    serde_json::from_str(&record.resource_value).ok()
}

/// Decoded result of a business-attribute fetch.
///
/// Pairs the optional firmware/MCU fragment from the embedded `deviceData`
/// sub-object with the decoded [`DeviceProperties`]. The firmware fragment
/// is returned for an explicit merge via [`Device::apply_firmware`] rather
/// than written through a shared mutable device handle.
#[derive(Debug, Clone)]
pub struct BusinessAttributes {
    pub firmware: Option<FirmwareInfo>,
    pub properties: DeviceProperties,
}

// ── Command encoding ─────────────────────────────────────────────────

/// Property assignments for a control command, in submission order.
pub type PropertyValues = IndexMap<String, Value>;

/// Encode property assignments into the wire's data list: one single-key
/// object per entry, preserving insertion order. Values pass through
/// uninterpreted -- type correctness is the caller's responsibility.
pub fn encode_property_data(properties: &PropertyValues) -> Vec<Value> {
    properties
        .iter()
        .map(|(code, value)| {
            let mut entry = serde_json::Map::new();
            entry.insert(code.clone(), value.clone());
            Value::Object(entry)
        })
        .collect()
}

// ── Command result ───────────────────────────────────────────────────

/// Fallback message when a batch response names the device in neither list.
pub const DEVICE_NOT_IN_RESPONSE: &str = "device not present in command response";

/// Outcome of a control command for one device.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub success: bool,
    /// Opaque tracking token, present iff the command was accepted.
    pub ticket: Option<String>,
    /// Upstream rejection message, present iff the command failed.
    pub error_message: Option<String>,
}

impl CommandResult {
    /// Derive the per-device outcome from a `batchControlDevice` response.
    ///
    /// The response carries disjoint `successList` / `failureList` arrays;
    /// absence from both is itself a failure (with a synthetic message),
    /// not an error -- the batch protocol permits it.
    pub fn from_response(response: &Value, product_key: &str, device_key: &str) -> Self {
        for item in list_entries(response, "successList") {
            if entry_matches(item, product_key, device_key) {
                return Self {
                    success: true,
                    ticket: item
                        .get("ticket")
                        .and_then(Value::as_str)
                        .map(str::to_owned),
                    error_message: None,
                };
            }
        }

        for item in list_entries(response, "failureList") {
            if entry_matches(item, product_key, device_key) {
                return Self {
                    success: false,
                    ticket: None,
                    error_message: item.get("msg").and_then(Value::as_str).map(str::to_owned),
                };
            }
        }

        Self {
            success: false,
            ticket: None,
            error_message: Some(DEVICE_NOT_IN_RESPONSE.to_owned()),
        }
    }
}

/// Iterate a response list field, treating `null` or missing as empty.
fn list_entries<'a>(response: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    response
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
}

fn entry_matches(item: &Value, product_key: &str, device_key: &str) -> bool {
    let Some(data) = item.get("data") else {
        return false;
    };
    data.get("productKey").and_then(Value::as_str) == Some(product_key)
        && data.get("deviceKey").and_then(Value::as_str) == Some(device_key)
}

// ── Thing Specification (product schema) ─────────────────────────────

/// How a schema property may be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum AccessMode {
    #[strum(serialize = "R")]
    ReadOnly,
    #[strum(serialize = "RW")]
    ReadWrite,
    #[strum(serialize = "W")]
    WriteOnly,
}

impl AccessMode {
    /// Map the wire `subType` field; absent or unrecognized means read-only.
    fn from_sub_type(sub_type: &str) -> Self {
        match sub_type {
            "RW" => Self::ReadWrite,
            "W" => Self::WriteOnly,
            _ => Self::ReadOnly,
        }
    }

    /// `true` when the property accepts control commands.
    pub fn is_writable(self) -> bool {
        !matches!(self, Self::ReadOnly)
    }
}

/// One property definition from the product's Thing Specification model.
#[derive(Debug, Clone, Serialize)]
pub struct TslProperty {
    pub code: String,
    pub name: String,
    pub data_type: String,
    pub access_mode: AccessMode,
}

impl TslProperty {
    fn from_value(value: &Value) -> Self {
        let code = value
            .get("code")
            .and_then(Value::as_str)
            .or_else(|| value.get("resourceCode").and_then(Value::as_str))
            .unwrap_or_default()
            .to_owned();
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let data_type = value
            .get("dataType")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let sub_type = value.get("subType").and_then(Value::as_str).unwrap_or("R");
        Self {
            code,
            name,
            data_type,
            access_mode: AccessMode::from_sub_type(sub_type),
        }
    }

    /// `true` when the property accepts control commands.
    pub fn writable(&self) -> bool {
        self.access_mode.is_writable()
    }
}

/// Normalize the `productTSL` payload into schema entries.
///
/// The endpoint is shape-flexible: the model may arrive as an object whose
/// `tslJson` string field embeds `{properties: [...]}`, as an object with a
/// direct `properties` list, or as a bare list of entries.
pub fn parse_tsl_properties(data: &Value) -> Vec<TslProperty> {
    if let Some(items) = data.as_array() {
        return items.iter().map(TslProperty::from_value).collect();
    }

    let embedded = match data.get("tslJson") {
        Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).ok(),
        Some(other) => Some(other.clone()),
        None => None,
    };

    let items = match &embedded {
        Some(tsl) if tsl.is_object() => tsl.get("properties").and_then(Value::as_array),
        _ => data.get("properties").and_then(Value::as_array),
    };

    items.map_or_else(Vec::new, |items| {
        items.iter().map(TslProperty::from_value).collect()
    })
}

// ── Login tokens ─────────────────────────────────────────────────────

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginTokens {
    pub access_token: TokenGrant,
    pub refresh_token: TokenGrant,
}

/// A single token grant. Expiry metadata varies by deployment and is kept
/// in `extra`; tokens are never persisted across process runs.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub token: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_records() -> Vec<PropertyRecord> {
        serde_json::from_value(json!([
            { "abId": 1, "resourceCode": "battery_percentage", "name": "Battery power",
              "type": "PROPERTY", "subType": "R", "dataType": "INT", "resourceValce": "98" },
            { "abId": 2, "resourceCode": "remain_time", "dataType": "INT", "resourceValce": "118" },
            { "abId": 3, "resourceCode": "remain_charging_time", "dataType": "INT", "resourceValce": "60" },
            { "abId": 4, "resourceCode": "total_input_power", "dataType": "INT", "resourceValce": "2" },
            { "abId": 5, "resourceCode": "total_output_power", "dataType": "INT", "resourceValce": "145" },
            { "abId": 27, "resourceCode": "ups_status_hm", "dataType": "BOOL", "resourceValce": "true" },
            { "abId": 38, "resourceCode": "dc_switch_hm", "dataType": "BOOL", "resourceValce": "false" },
            { "abId": 40, "resourceCode": "ac_switch_hm", "dataType": "BOOL", "resourceValce": "true" },
            { "abId": 31, "resourceCode": "ac_data_output_hm", "dataType": "STRUCT",
              "resourceValce": "{\"ac_output_voltage\":\"124\",\"ac_output_power\":\"145\",\"ac_output_pf\":\"1\",\"ac_output_hz\":\"60\"}" },
            { "abId": 30, "resourceCode": "dc_data_output_hm", "dataType": "STRUCT",
              "resourceValce": "{\"dc_output_power\":\"0\"}" },
            { "abId": 29, "resourceCode": "ac_data_input_hm", "dataType": "STRUCT",
              "resourceValce": "{\"ac_power\":\"2\"}" },
            { "abId": 28, "resourceCode": "dc_data_input_hm", "dataType": "STRUCT",
              "resourceValce": "{\"dc_input_power\":\"0\"}" }
        ]))
        .unwrap()
    }

    // ── Device ──────────────────────────────────────────────────────

    #[test]
    fn device_parses_list_entry() {
        let device: Device = serde_json::from_value(json!({
            "deviceName": "E300LFP_D469",
            "productKey": "p11u2Q",
            "deviceKey": "ACD9296AD469",
            "productName": "E300LFP",
            "onlineStatus": 1,
            "protocol": "MQTT",
            "signalStrength": -63,
            "lastConnTime": "2026-02-04 05:46:25",
            "sn": null
        }))
        .unwrap();

        assert_eq!(device.device_name, "E300LFP_D469");
        assert_eq!(device.product_key, "p11u2Q");
        assert_eq!(device.device_key, "ACD9296AD469");
        assert!(device.online);
        assert_eq!(device.protocol, "MQTT");
        assert_eq!(device.signal_strength, Some(-63));
        assert_eq!(device.serial_number, None);
        assert_eq!(device.firmware_version, None);
    }

    #[test]
    fn device_offline_when_status_not_one() {
        let device: Device = serde_json::from_value(json!({ "onlineStatus": 0 })).unwrap();
        assert!(!device.online);
    }

    #[test]
    fn device_defaults_for_missing_fields() {
        let device: Device = serde_json::from_value(json!({})).unwrap();
        assert_eq!(device.device_name, "Unknown");
        assert_eq!(device.product_key, "");
        assert!(!device.online);
    }

    #[test]
    fn device_merges_firmware_fragment() {
        let mut device: Device = serde_json::from_value(json!({})).unwrap();
        device.apply_firmware(&FirmwareInfo {
            version: Some("1.2.3".into()),
            mcu_version: None,
        });
        assert_eq!(device.firmware_version.as_deref(), Some("1.2.3"));
        assert_eq!(device.mcu_version, None);
    }

    // ── DeviceProperties ────────────────────────────────────────────

    #[test]
    fn decodes_integer_codes() {
        let props = DeviceProperties::from_records(sample_records());
        assert_eq!(props.battery_percentage, Some(98));
        assert_eq!(props.total_input_power, Some(2));
        assert_eq!(props.total_output_power, Some(145));
        assert_eq!(props.remain_charging_time, Some(60));
        assert_eq!(props.remain_discharging_time, Some(118));
    }

    #[test]
    fn decodes_switch_codes() {
        let props = DeviceProperties::from_records(sample_records());
        assert_eq!(props.ac_switch, Some(true));
        assert_eq!(props.dc_switch, Some(false));
        assert_eq!(props.ups_status, Some(true));
    }

    #[test]
    fn decodes_struct_codes() {
        let props = DeviceProperties::from_records(sample_records());
        let ac_output = props.ac_output.unwrap();
        assert_eq!(ac_output["ac_output_voltage"], json!("124"));
        assert_eq!(ac_output["ac_output_power"], json!("145"));
        assert_eq!(props.dc_output.unwrap()["dc_output_power"], json!("0"));
        assert_eq!(props.ac_input.unwrap()["ac_power"], json!("2"));
        assert_eq!(props.dc_input.unwrap()["dc_input_power"], json!("0"));
    }

    #[test]
    fn struct_code_ignored_unless_declared_struct() {
        let records: Vec<PropertyRecord> = serde_json::from_value(json!([
            { "resourceCode": "ac_data_output_hm", "dataType": "TEXT",
              "resourceValce": "{\"ac_output_power\":\"10\"}" }
        ]))
        .unwrap();
        let props = DeviceProperties::from_records(records);
        assert_eq!(props.ac_output, None);
        assert_eq!(props.raw().len(), 1);
    }

    #[test]
    fn malformed_value_leaves_field_unset() {
        let records: Vec<PropertyRecord> = serde_json::from_value(json!([
            { "resourceCode": "battery_percentage", "dataType": "INT",
              "resourceValce": "not_a_number" }
        ]))
        .unwrap();
        let props = DeviceProperties::from_records(records);
        assert_eq!(props.battery_percentage, None);
        assert_eq!(props.raw().len(), 1);
    }

    #[test]
    fn raw_sequence_is_retained_verbatim() {
        let props = DeviceProperties::from_records(sample_records());
        assert_eq!(props.raw().len(), 12);
    }

    #[test]
    fn lookup_scans_raw_records() {
        let props = DeviceProperties::from_records(sample_records());
        assert_eq!(props.lookup("battery_percentage"), Some("98"));
        assert_eq!(props.lookup("nonexistent"), None);
    }

    #[test]
    fn empty_record_set_decodes_to_all_unset() {
        let props = DeviceProperties::from_records(Vec::new());
        assert_eq!(props.battery_percentage, None);
        assert!(props.raw().is_empty());
    }

    // ── Command encoding ────────────────────────────────────────────

    #[test]
    fn encodes_one_object_per_property_in_order() {
        let mut properties = PropertyValues::new();
        properties.insert("ac_switch_hm".into(), json!(true));
        properties.insert("dc_switch_hm".into(), json!(false));

        let data = encode_property_data(&properties);
        assert_eq!(data, vec![json!({"ac_switch_hm": true}), json!({"dc_switch_hm": false})]);
    }

    // ── CommandResult ───────────────────────────────────────────────

    #[test]
    fn command_result_success_carries_ticket() {
        let response = json!({
            "successList": [
                { "data": { "productKey": "pk1", "deviceKey": "dk1" }, "ticket": "ticket_abc" }
            ],
            "failureList": []
        });
        let result = CommandResult::from_response(&response, "pk1", "dk1");
        assert!(result.success);
        assert_eq!(result.ticket.as_deref(), Some("ticket_abc"));
        assert_eq!(result.error_message, None);
    }

    #[test]
    fn command_result_failure_carries_message() {
        let response = json!({
            "successList": [],
            "failureList": [
                { "data": { "productKey": "pk1", "deviceKey": "dk1" }, "msg": "Device offline" }
            ]
        });
        let result = CommandResult::from_response(&response, "pk1", "dk1");
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("Device offline"));
        assert_eq!(result.ticket, None);
    }

    #[test]
    fn command_result_device_absent_from_both_lists() {
        let response = json!({
            "successList": [
                { "data": { "productKey": "other_pk", "deviceKey": "other_dk" }, "ticket": "t1" }
            ],
            "failureList": []
        });
        let result = CommandResult::from_response(&response, "pk1", "dk1");
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some(DEVICE_NOT_IN_RESPONSE));
    }

    #[test]
    fn command_result_tolerates_missing_or_null_lists() {
        let result = CommandResult::from_response(&json!({}), "pk1", "dk1");
        assert!(!result.success);

        let result = CommandResult::from_response(
            &json!({ "successList": null, "failureList": null }),
            "pk1",
            "dk1",
        );
        assert!(!result.success);
    }

    // ── Thing Specification ─────────────────────────────────────────

    #[test]
    fn tsl_parses_nested_json_string() {
        let inner = json!({
            "properties": [
                { "code": "battery_percentage", "name": "Battery power",
                  "dataType": "INT", "subType": "R" },
                { "code": "ac_switch_hm", "name": "Ac switch",
                  "dataType": "BOOL", "subType": "RW" }
            ]
        });
        let data = json!({ "tslJson": inner.to_string() });

        let props = parse_tsl_properties(&data);
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].code, "battery_percentage");
        assert!(!props[0].writable());
        assert_eq!(props[1].code, "ac_switch_hm");
        assert!(props[1].writable());
    }

    #[test]
    fn tsl_parses_flat_properties_object() {
        let data = json!({
            "properties": [
                { "code": "dc_switch_hm", "name": "Dc switch", "dataType": "BOOL", "subType": "RW" }
            ]
        });
        let props = parse_tsl_properties(&data);
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].code, "dc_switch_hm");
        assert_eq!(props[0].access_mode, AccessMode::ReadWrite);
    }

    #[test]
    fn tsl_parses_bare_list() {
        let data = json!([
            { "code": "battery_percentage", "name": "Battery", "dataType": "INT", "subType": "R" }
        ]);
        assert_eq!(parse_tsl_properties(&data).len(), 1);
    }

    #[test]
    fn tsl_equivalent_shapes_produce_identical_entries() {
        let entries = json!([
            { "code": "ac_switch_hm", "name": "Ac switch", "dataType": "BOOL", "subType": "RW" }
        ]);
        let nested = json!({ "tslJson": json!({ "properties": entries.clone() }).to_string() });
        let flat = json!({ "properties": entries.clone() });

        let from_nested = parse_tsl_properties(&nested);
        let from_flat = parse_tsl_properties(&flat);
        let from_bare = parse_tsl_properties(&entries);

        for props in [&from_flat, &from_bare] {
            assert_eq!(props.len(), from_nested.len());
            assert_eq!(props[0].code, from_nested[0].code);
            assert_eq!(props[0].access_mode, from_nested[0].access_mode);
        }
    }

    #[test]
    fn tsl_empty_payload_yields_no_entries() {
        assert!(parse_tsl_properties(&json!({})).is_empty());
    }

    #[test]
    fn tsl_write_only_is_writable() {
        let data = json!([
            { "code": "some_command", "name": "Command", "dataType": "INT", "subType": "W" }
        ]);
        let props = parse_tsl_properties(&data);
        assert_eq!(props[0].access_mode, AccessMode::WriteOnly);
        assert!(props[0].writable());
    }

    #[test]
    fn tsl_sub_type_defaults_to_read_only() {
        let props = parse_tsl_properties(&json!([{ "code": "x" }]));
        assert_eq!(props[0].access_mode, AccessMode::ReadOnly);
        assert!(!props[0].writable());
    }

    #[test]
    fn tsl_code_falls_back_to_resource_code() {
        let props = parse_tsl_properties(&json!([
            { "resourceCode": "dc_switch_hm", "name": "Dc switch", "dataType": "BOOL", "subType": "RW" }
        ]));
        assert_eq!(props[0].code, "dc_switch_hm");
    }
}
