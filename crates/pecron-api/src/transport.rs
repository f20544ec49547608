// Transport configuration for building reqwest::Client instances.
//
// The client performs one blocking round trip per operation; connection and
// read timeouts are the only cancellation mechanism, so they live here
// rather than in the API surface.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("pecron-api/", env!("CARGO_PKG_VERSION"));

/// Transport knobs shared by every request a client makes.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout (connect + read).
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Transport)
    }
}
