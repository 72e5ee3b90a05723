//! Affiliate API settings management.
//!
//! Reads are always masked; updates merge non-empty fields over the stored
//! document and persist immediately.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{ApiSettings, SettingsPatch};
use crate::storage::{Document, DocumentStore, StorageError, read_or_fallback};

/// SettingsManager owns the settings document.
#[derive(Clone)]
pub struct SettingsManager {
    store: Arc<dyn DocumentStore>,
}

impl SettingsManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Returns the settings with the secret replaced by the mask.
    pub async fn get(&self) -> ApiSettings {
        self.load().await.masked()
    }

    /// Returns the raw settings, secret included. For outbound signing only.
    pub async fn load(&self) -> ApiSettings {
        let value = read_or_fallback(self.store.as_ref(), Document::Settings).await;
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(error = %e, "Stored settings have an unexpected shape, using empty settings");
            ApiSettings::default()
        })
    }

    /// Merges `patch` over the stored settings and persists the result.
    pub async fn update(&self, patch: &SettingsPatch) -> Result<(), StorageError> {
        let merged = self.load().await.merge(patch);
        let value = serde_json::to_value(&merged)?;

        if let Err(e) = self.store.write(Document::Settings, &value).await {
            error!(error = %e, "Failed to save settings");
            return Err(e);
        }

        info!(
            api_url = %merged.api_url,
            has_credentials = merged.has_credentials(),
            "Settings saved"
        );
        Ok(())
    }
}
