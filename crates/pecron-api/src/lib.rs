// pecron-api: Async Rust client for the Pecron/Quectel IoE cloud API
//
// Unofficial client for the cloud platform behind Pecron portable power
// stations: reverse-engineered credential encryption, device listing,
// telemetry decoding, and property-set control commands.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod region;
pub mod transport;

pub use client::PecronClient;
pub use error::Error;
pub use models::{
    AccessMode, BusinessAttributes, CommandResult, Device, DeviceProperties, FirmwareInfo,
    PropertyRecord, PropertyValues, TslProperty,
};
pub use region::Region;
pub use transport::TransportConfig;
