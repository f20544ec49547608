// Cloud API HTTP client
//
// Wraps `reqwest::Client` with the vendor's header set, the `{code, msg,
// data}` envelope unwrapping, and the high-level account/device operations.
// Every operation is a single round trip; there is no internal caching,
// queuing, or retry -- callers fan out across devices themselves.

use std::sync::RwLock;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::auth;
use crate::error::Error;
use crate::models::{
    BusinessAttributes, CommandResult, Device, DeviceProperties, FirmwareInfo, LoginTokens,
    PropertyRecord, PropertyValues, TslProperty, encode_property_data, parse_tsl_properties,
};
use crate::region::{Region, RegionConfig};
use crate::transport::TransportConfig;

// App identity presented to the cloud. The backend gates the login flow on
// these, so they mirror the vendor app release the protocol was taken from.
const APP_ID: &str = "633";
const APP_VERSION: &str = "1.9.0";
const APP_SYSTEM_TYPE: &str = "android";
const APP_INFO: &str = "[pecron-cli][Rust][pecron-api][1]";

/// Standard response envelope. `code == 200` means success and `data`
/// carries the payload; any other code is an application-level failure.
#[derive(serde::Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Value,
}

/// Authenticated client for the Pecron/Quectel cloud API.
///
/// Created unauthenticated; [`login`](Self::login) stores the bearer token
/// used by every subsequent call. Tokens live only in memory and die with
/// the client. The token slots use interior locking so operations take
/// `&self`, but the client is not designed for concurrent mutation from
/// multiple threads -- wrap it externally if you need that.
pub struct PecronClient {
    http: reqwest::Client,
    region: Region,
    config: &'static RegionConfig,
    base_url: Url,
    access_token: RwLock<Option<String>>,
    refresh_token: RwLock<Option<String>>,
}

impl PecronClient {
    /// Create a client for a region with default transport settings.
    pub fn new(region: Region) -> Result<Self, Error> {
        Self::with_transport(region, &TransportConfig::default())
    }

    /// Create a client for a region with explicit transport settings.
    pub fn with_transport(region: Region, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(region.config().base_url)?;
        Self::with_base_url(region, base_url, transport)
    }

    /// Create a client pointed at an explicit base URL instead of the
    /// region's vendor host. Signing still uses the region's secret.
    /// Intended for tests and local proxies.
    pub fn with_base_url(
        region: Region,
        base_url: Url,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            region,
            config: region.config(),
            base_url,
            access_token: RwLock::new(None),
            refresh_token: RwLock::new(None),
        })
    }

    /// The region this client talks to.
    pub fn region(&self) -> Region {
        self.region
    }

    /// `true` once a login has stored an access token.
    pub fn is_authenticated(&self) -> bool {
        self.access_token
            .read()
            .expect("token lock poisoned")
            .is_some()
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// Headers sent on every call: language tag, per-request correlation
    /// token, client identity, and (once authenticated) the raw access
    /// token as the `Authorization` value -- no `Bearer` prefix.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("X-Q-Language", HeaderValue::from_static("en"));
        let correlation = Uuid::new_v4().to_string();
        headers.insert(
            "quec-random-url",
            HeaderValue::from_str(&correlation).expect("UUID is a valid header value"),
        );
        headers.insert("app-info", HeaderValue::from_static(APP_INFO));
        headers.insert("appId", HeaderValue::from_static(APP_ID));
        headers.insert("appVersion", HeaderValue::from_static(APP_VERSION));
        headers.insert("appSystemType", HeaderValue::from_static(APP_SYSTEM_TYPE));

        let token = self.access_token.read().expect("token lock poisoned");
        if let Some(token) = token.as_deref() {
            // Header-safety is checked when the token is stored at login.
            let mut value =
                HeaderValue::from_str(token).expect("stored token is a valid header value");
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, Error> {
        let url = self.endpoint(path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .query(params)
            .headers(self.headers())
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Value, Error> {
        let url = self.endpoint(path)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .form(form)
            .headers(self.headers())
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Unwrap the `{code, msg, data}` envelope, returning `data` on
    /// success or an `Error::Api` for any non-200 application code.
    async fn parse_envelope(resp: reqwest::Response) -> Result<Value, Error> {
        let resp = resp.error_for_status().map_err(Error::Transport)?;
        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if envelope.code != 200 {
            return Err(Error::Api {
                code: envelope.code,
                message: envelope.msg,
            });
        }
        Ok(envelope.data)
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Authenticate with email and password.
    ///
    /// Draws a fresh nonce, encrypts the password, and signs the form (see
    /// [`crate::auth`]). On success the access/refresh tokens are stored
    /// for subsequent requests; a new login simply overwrites them.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), Error> {
        let nonce = auth::generate_nonce();
        let encrypted_pwd = auth::encrypt_password(password.expose_secret(), &nonce);
        let signature =
            auth::compute_signature(email, &encrypted_pwd, &nonce, self.config.user_domain_secret);

        debug!(region = %self.region, "logging in");

        let form = [
            ("email", email),
            ("pwd", encrypted_pwd.as_str()),
            ("random", nonce.as_str()),
            ("userDomain", self.config.user_domain),
            ("signature", signature.as_str()),
        ];

        let data = match self
            .post_form("/v2/enduser/enduserapi/emailPwdLogin", &form)
            .await
        {
            Ok(data) => data,
            Err(Error::Api { code, message }) => {
                return Err(Error::Authentication { code, message });
            }
            Err(e) => return Err(e),
        };

        let tokens: LoginTokens = serde_json::from_value(data.clone()).map_err(|e| {
            Error::Deserialization {
                message: format!("login response: {e}"),
                body: data.to_string(),
            }
        })?;

        HeaderValue::from_str(&tokens.access_token.token).map_err(|_| Error::Authentication {
            code: 200,
            message: "upstream returned a token that is not header-safe".to_owned(),
        })?;

        debug!(
            expires = ?tokens.access_token.extra.get("expirationTime"),
            "login successful"
        );

        *self.access_token.write().expect("token lock poisoned") =
            Some(tokens.access_token.token);
        *self.refresh_token.write().expect("token lock poisoned") =
            Some(tokens.refresh_token.token);
        Ok(())
    }

    /// List all devices bound to the account.
    ///
    /// `GET /v2/binding/enduserapi/userDeviceList` -- the payload is either
    /// a bare array or wrapped as `{list: [...]}`.
    pub async fn get_devices(&self) -> Result<Vec<Device>, Error> {
        let data = self.get("/v2/binding/enduserapi/userDeviceList", &[]).await?;

        let list = data.get("list").cloned().unwrap_or(data);
        if list.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(list.clone()).map_err(|e| Error::Deserialization {
            message: format!("device list: {e}"),
            body: list.to_string(),
        })
    }

    /// Fetch the raw business-attribute payload for a device.
    ///
    /// Upstream application code 404 or 4004 means the `(pk, dk)` pair is
    /// unknown and maps to [`Error::DeviceNotFound`]; any other non-200
    /// code is re-raised as [`Error::Api`].
    pub async fn get_device_business_attributes(&self, device: &Device) -> Result<Value, Error> {
        let params = [
            ("pk", device.product_key.as_str()),
            ("dk", device.device_key.as_str()),
        ];
        match self
            .get("/v2/binding/enduserapi/getDeviceBusinessAttributes", &params)
            .await
        {
            Ok(data) => Ok(data),
            Err(Error::Api { code, message }) if code == 404 || code == 4004 => {
                Err(Error::DeviceNotFound { code, message })
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch and decode current device state (battery, power, switches).
    ///
    /// Returns the decoded properties together with a firmware fragment
    /// from the embedded `deviceData` sub-object when present; merge it
    /// with [`Device::apply_firmware`] if you want the device handle
    /// updated.
    pub async fn get_device_properties(
        &self,
        device: &Device,
    ) -> Result<BusinessAttributes, Error> {
        let data = self.get_device_business_attributes(device).await?;

        let firmware = data
            .get("deviceData")
            .map(|d| serde_json::from_value::<FirmwareInfo>(d.clone()).unwrap_or_default())
            .filter(|info| !info.is_empty());

        let records: Vec<PropertyRecord> = match data.get("customizeTslInfo") {
            Some(Value::Array(items)) => {
                serde_json::from_value(Value::Array(items.clone())).map_err(|e| {
                    Error::Deserialization {
                        message: format!("customizeTslInfo: {e}"),
                        body: data.to_string(),
                    }
                })?
            }
            _ => Vec::new(),
        };

        Ok(BusinessAttributes {
            firmware,
            properties: DeviceProperties::from_records(records),
        })
    }

    /// Fetch the raw device-info payload.
    ///
    /// `GET /v2/binding/enduserapi/deviceInfo` -- undocumented shape, so it
    /// is returned untyped.
    pub async fn get_device_info(&self, device: &Device) -> Result<Value, Error> {
        let params = [
            ("pk", device.product_key.as_str()),
            ("dk", device.device_key.as_str()),
        ];
        self.get("/v2/binding/enduserapi/deviceInfo", &params).await
    }

    /// Fetch the Thing Specification model for a product.
    ///
    /// Use this to discover which property codes a device model supports
    /// and which of them accept commands.
    pub async fn get_product_tsl(&self, product_key: &str) -> Result<Vec<TslProperty>, Error> {
        let data = self
            .get(
                "/v2/binding/enduserapi/productTSL",
                &[("productKey", product_key)],
            )
            .await?;
        Ok(parse_tsl_properties(&data))
    }

    /// Set one or more device properties.
    ///
    /// Encodes the assignments into the batch-control envelope and submits
    /// them for this single device. A rejected submission raises
    /// [`Error::Command`]; a per-device rejection inside an accepted batch
    /// comes back as a failed [`CommandResult`].
    pub async fn set_device_property(
        &self,
        device: &Device,
        properties: &PropertyValues,
    ) -> Result<CommandResult, Error> {
        let data_json = Value::Array(encode_property_data(properties)).to_string();
        let batch = serde_json::json!({
            "data": data_json,
            "deviceList": [{
                "productKey": device.product_key,
                "deviceKey": device.device_key,
            }],
            "type": 0,
        });
        let payload = batch.to_string();
        let form = [("json", payload.as_str())];

        debug!(
            device = %device.device_name,
            codes = ?properties.keys().collect::<Vec<_>>(),
            "submitting control command"
        );

        let data = match self
            .post_form("/v2/binding/enduserapi/batchControlDevice", &form)
            .await
        {
            Ok(data) => data,
            Err(Error::Api { code, message }) => return Err(Error::Command { code, message }),
            Err(e) => return Err(e),
        };

        Ok(CommandResult::from_response(
            &data,
            &device.product_key,
            &device.device_key,
        ))
    }

    /// Enable or disable the AC output.
    pub async fn set_ac_output(
        &self,
        device: &Device,
        enabled: bool,
    ) -> Result<CommandResult, Error> {
        let mut properties = PropertyValues::new();
        properties.insert("ac_switch_hm".to_owned(), Value::Bool(enabled));
        self.set_device_property(device, &properties).await
    }

    /// Enable or disable the DC output.
    pub async fn set_dc_output(
        &self,
        device: &Device,
        enabled: bool,
    ) -> Result<CommandResult, Error> {
        let mut properties = PropertyValues::new();
        properties.insert("dc_switch_hm".to_owned(), Value::Bool(enabled));
        self.set_device_property(device, &properties).await
    }
}
