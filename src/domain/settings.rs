//! Affiliate API credentials as stored in the settings document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder returned instead of the stored secret.
pub const SECRET_MASK: &str = "***";

/// ApiSettings holds the affiliate gateway URL and credentials.
///
/// The legacy `taobao*` field names are accepted when reading. Fields of an
/// unexpected type read as text (numbers, booleans) or as empty, so one bad
/// field never discards the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Gateway URL; empty means the configured default gateway.
    #[serde(alias = "taobaoApiUrl", deserialize_with = "lenient_string")]
    pub api_url: String,
    /// Application key issued by the affiliate platform.
    #[serde(alias = "taobaoAppKey", deserialize_with = "lenient_string")]
    pub app_key: String,
    /// Application secret used to sign requests. Never echoed back.
    #[serde(alias = "taobaoAppSecret", deserialize_with = "lenient_string")]
    pub app_secret: String,
}

impl ApiSettings {
    /// Returns a copy safe to hand to clients.
    pub fn masked(&self) -> Self {
        Self {
            api_url: self.api_url.clone(),
            app_key: self.app_key.clone(),
            app_secret: SECRET_MASK.to_string(),
        }
    }

    /// Returns true when both key and secret are set.
    pub fn has_credentials(&self) -> bool {
        !self.app_key.is_empty() && !self.app_secret.is_empty()
    }

    /// Overlays the non-empty fields of `patch`.
    pub fn merge(&self, patch: &SettingsPatch) -> Self {
        fn pick(new: &Option<String>, current: &str) -> String {
            match new.as_deref() {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => current.to_string(),
            }
        }

        Self {
            api_url: pick(&patch.api_url, &self.api_url),
            app_key: pick(&patch.app_key, &self.app_key),
            app_secret: pick(&patch.app_secret, &self.app_secret),
        }
    }
}

/// SettingsPatch is a partial update; absent or empty fields keep the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, alias = "taobaoApiUrl", deserialize_with = "lenient_option")]
    pub api_url: Option<String>,
    #[serde(default, alias = "taobaoAppKey", deserialize_with = "lenient_option")]
    pub app_key: Option<String>,
    #[serde(default, alias = "taobaoAppSecret", deserialize_with = "lenient_option")]
    pub app_secret: Option<String>,
}

fn plain_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(plain_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(plain_text(Value::deserialize(deserializer)?))
}
