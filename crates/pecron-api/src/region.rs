// Region configuration
//
// The vendor operates three deployment realms, each with its own API host,
// user-domain identifier, and signing secret. These are fixed constants
// extracted from the vendor app -- nothing here is negotiated at runtime.
// The signing secret is configuration data shipped inside every app
// install, not a credential this crate owns or rotates.

use strum::{Display, EnumIter, EnumString};

/// A cloud deployment realm. Selected once per client instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Region {
    /// Mainland China (quectelcn.com).
    Cn,
    /// Europe (acceleronix.io).
    Eu,
    /// Americas (landecia.com).
    Us,
}

/// Static per-region connection and signing parameters.
#[derive(Debug, Clone, Copy)]
pub struct RegionConfig {
    /// API host root, e.g. `https://iot-api.landecia.com`.
    pub base_url: &'static str,
    /// Region-scoped tenant identifier sent in the login form.
    pub user_domain: &'static str,
    /// Shared secret mixed into the login signature. See [`crate::auth`].
    pub user_domain_secret: &'static str,
}

const CN: RegionConfig = RegionConfig {
    base_url: "https://iot-api.quectelcn.com",
    user_domain: "C.DM.5903.1",
    user_domain_secret: "EufftRJSuWuVY7c6txzGifV9bJcfXHAFa7hXY5doXSn7",
};

const EU: RegionConfig = RegionConfig {
    base_url: "https://iot-api.acceleronix.io",
    user_domain: "C.DM.10351.1",
    user_domain_secret: "FA5ZHXSka8y9GHvU91Hz1vWvaDSHE2mGW5B7bpn3fXTW",
};

const US: RegionConfig = RegionConfig {
    base_url: "https://iot-api.landecia.com",
    user_domain: "U.DM.10351.1",
    user_domain_secret: "HARsQXfeex8vxyaPRAM8fyjqqVuH2uxAGQ3inJ8XxTiB",
};

impl Region {
    /// The static configuration for this region.
    pub fn config(self) -> &'static RegionConfig {
        match self {
            Self::Cn => &CN,
            Self::Eu => &EU,
            Self::Us => &US,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parses_wire_names_case_insensitively() {
        assert_eq!(Region::from_str("US").unwrap(), Region::Us);
        assert_eq!(Region::from_str("eu").unwrap(), Region::Eu);
        assert_eq!(Region::from_str("Cn").unwrap(), Region::Cn);
        assert!(Region::from_str("JP").is_err());
    }

    #[test]
    fn displays_as_uppercase() {
        assert_eq!(Region::Us.to_string(), "US");
    }

    #[test]
    fn every_region_has_distinct_config() {
        let configs: Vec<_> = Region::iter().map(Region::config).collect();
        for (i, a) in configs.iter().enumerate() {
            for b in &configs[i + 1..] {
                assert_ne!(a.base_url, b.base_url);
                assert_ne!(a.user_domain_secret, b.user_domain_secret);
            }
        }
    }
}
