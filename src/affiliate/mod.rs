//! Affiliate platform integration: gateway client, search dispatch and
//! response normalization.

mod client;
mod normalize;
mod search;

pub use client::TopClient;
pub use normalize::{find_item, normalize_item};
pub use search::{CouponSearch, SearchError, SearchKind};

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::ApiSettings;

/// Gateway error reported inside an `error_response` body.
#[derive(Debug, Error)]
#[error("top api error {code}: {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Affiliate client errors.
#[derive(Debug, Error)]
pub enum AffiliateError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("gateway response is missing {0}")]
    MissingResponse(String),
}

/// Result type for affiliate operations.
pub type Result<T> = std::result::Result<T, AffiliateError>;

/// Credentials and endpoint used for one gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub gateway_url: String,
    pub app_key: String,
    pub app_secret: String,
}

impl Credentials {
    /// Builds credentials from stored settings, using `default_url` when no gateway is set.
    pub fn from_settings(settings: &ApiSettings, default_url: &str) -> Self {
        let gateway_url = if settings.api_url.is_empty() {
            default_url.to_string()
        } else {
            settings.api_url.clone()
        };

        Self {
            gateway_url,
            app_key: settings.app_key.clone(),
            app_secret: settings.app_secret.clone(),
        }
    }
}

/// AffiliateApi invokes one named remote operation on the affiliate gateway.
#[async_trait]
pub trait AffiliateApi: Send + Sync {
    /// Execute calls `method` with business `params` and returns the unwrapped
    /// response body.
    async fn execute(
        &self,
        credentials: &Credentials,
        method: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Value>;
}
