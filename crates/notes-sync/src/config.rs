//! Client Configuration
//!
//! Remote endpoint, timeouts and status acceptance policy.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
/// Must outlast a list re-fetch, which is itself bounded by the request timeout
pub const DEFAULT_REFRESH_ACK_TIMEOUT_MS: u64 = 6000;

/// Which response statuses count as success.
///
/// `Legacy` keeps the historical inclusive upper bound, so a bare `300`
/// is accepted. `Strict` is the conventional `200..300`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusWindow {
    #[default]
    Legacy,
    Strict,
}

impl StatusWindow {
    pub fn accepts(self, status: u16) -> bool {
        match self {
            StatusWindow::Legacy => (200..=300).contains(&status),
            StatusWindow::Strict => (200..300).contains(&status),
        }
    }
}

/// Settings shared by the gateway and the refresh bus
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub refresh_ack_timeout_ms: u64,
    pub status_window: StatusWindow,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            refresh_ack_timeout_ms: DEFAULT_REFRESH_ACK_TIMEOUT_MS,
            status_window: StatusWindow::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base url taken from `NOTES_API_BASE_URL` at build time
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("NOTES_API_BASE_URL") {
            config.base_url = url.to_string();
        }
        config
    }

    /// Parse a JSON document; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::BaseUrl {
                url: self.base_url.clone(),
                reason: "not a hierarchical url".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout { field: "request_timeout_ms" });
        }
        if self.refresh_ack_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout { field: "refresh_ack_timeout_ms" });
        }
        if self.refresh_ack_timeout_ms <= self.request_timeout_ms {
            return Err(ConfigError::AckBeforeRequest {
                ack_ms: self.refresh_ack_timeout_ms,
                request_ms: self.request_timeout_ms,
            });
        }
        Ok(())
    }

    /// This config if it validates, otherwise the defaults
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::error!("[Config] {}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn refresh_ack_timeout(&self) -> Duration {
        Duration::from_millis(self.refresh_ack_timeout_ms)
    }

    /// Absolute url for a service path such as `/notes/archived`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
