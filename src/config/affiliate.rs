//! Affiliate gateway configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Gateway used when the stored settings carry no `apiUrl`.
pub const DEFAULT_GATEWAY_URL: &str = "http://gw.api.taobao.com/router/rest";

/// Affiliate API client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AffiliateConfig {
    /// Fallback gateway URL.
    #[serde(default = "default_url")]
    pub default_url: String,
    /// Request timeout; zero or absent leaves calls unbounded.
    #[serde(default, with = "duration")]
    pub timeout: Duration,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            default_url: default_url(),
            timeout: Duration::ZERO,
        }
    }
}

impl AffiliateConfig {
    /// Returns the configured timeout, or `None` when calls are unbounded.
    pub fn request_timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }
}

fn default_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}
