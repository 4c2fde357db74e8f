//! Startup Configuration
//!
//! Service endpoint, access key and client identity, read once at startup and
//! immutable afterwards.

use std::fmt;

use reqwest::Url;

use crate::error::ConfigError;
use crate::models::ClientId;

pub const SERVICE_URL_VAR: &str = "CATALOG_SERVICE_URL";
pub const SERVICE_KEY_VAR: &str = "CATALOG_SERVICE_KEY";
pub const CLIENT_ID_VAR: &str = "CATALOG_CLIENT_ID";

/// Process-wide configuration supplied by the hosting environment
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    service_url: String,
    service_key: String,
    client_id: ClientId,
}

impl AppConfig {
    /// Validate and build a configuration. The URL loses any trailing `/`.
    pub fn new(
        service_url: &str,
        service_key: &str,
        client_id: &str,
    ) -> Result<Self, ConfigError> {
        let service_url = require(SERVICE_URL_VAR, service_url)?;
        let service_key = require(SERVICE_KEY_VAR, service_key)?;
        let client_id = require(CLIENT_ID_VAR, client_id)?;

        let parsed = Url::parse(service_url).map_err(|e| ConfigError::InvalidUrl {
            url: service_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: service_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(Self {
            service_url: service_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            client_id: ClientId::new(client_id),
        })
    }

    /// Build from a variable lookup (environment, build-time constants, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(SERVICE_URL_VAR).unwrap_or_default();
        let key = lookup(SERVICE_KEY_VAR).unwrap_or_default();
        let client = lookup(CLIENT_ID_VAR).unwrap_or_default();
        Self::new(&url, &key, &client)
    }

    /// Configuration baked in at compile time, the way a static web bundle
    /// receives its environment
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| {
            let value = match name {
                SERVICE_URL_VAR => option_env!("CATALOG_SERVICE_URL"),
                SERVICE_KEY_VAR => option_env!("CATALOG_SERVICE_KEY"),
                CLIENT_ID_VAR => option_env!("CATALOG_CLIENT_ID"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }
}

// Keeps the access key out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("service_url", &self.service_url)
            .field("service_key", &"<redacted>")
            .field("client_id", &self.client_id)
            .finish()
    }
}

fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ConfigError::Missing(name))
    } else {
        Ok(value)
    }
}
