use thiserror::Error;

/// Top-level error type for the `pecron-api` crate.
///
/// Application-level failures (the `{code, msg, data}` envelope with
/// `code != 200`) are split per call path: login yields [`Authentication`],
/// property fetches for an unknown device yield [`DeviceNotFound`], command
/// submission yields [`Command`], and everything else stays the generic
/// [`Api`] kind. Transport failures are surfaced unchanged from `reqwest`.
///
/// [`Authentication`]: Error::Authentication
/// [`DeviceNotFound`]: Error::DeviceNotFound
/// [`Command`]: Error::Command
/// [`Api`]: Error::Api
#[derive(Debug, Error)]
pub enum Error {
    // ── Application-level (upstream envelope) ───────────────────────
    /// Non-200 application code from any endpoint without a more specific
    /// classification.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Login rejected (wrong credentials, locked account, bad signature).
    #[error("Authentication failed ({code}): {message}")]
    Authentication { code: i64, message: String },

    /// Property fetch for an unknown (productKey, deviceKey) pair.
    /// Upstream signals this as application code 404 or 4004.
    #[error("Device not found ({code}): {message}")]
    DeviceNotFound { code: i64, message: String },

    /// Control command submission rejected before reaching the device.
    /// Per-device rejections inside an accepted batch are reported via
    /// `CommandResult`, not this error.
    #[error("Command failed ({code}): {message}")]
    Command { code: i64, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, non-2xx
    /// status, timeout at the HTTP layer).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// Response body did not match the expected shape. Carries the raw
    /// body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The upstream application code, if this error carries one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. }
            | Self::Authentication { code, .. }
            | Self::DeviceNotFound { code, .. }
            | Self::Command { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if this is a "device not found" failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DeviceNotFound { .. })
    }

    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
