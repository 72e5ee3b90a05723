//! Goods repository: CRUD and pagination over the goods document.
//!
//! The whole collection is reloaded before every operation and rewritten
//! after every mutation. Newest items come first. Entries this service did
//! not write itself are kept and written back untouched.

mod id;

pub use id::IdGenerator;

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::{GoodsEntry, GoodsItem, GoodsPage};
use crate::storage::{Document, DocumentStore, StorageError, read_or_fallback};

/// Goods repository errors.
#[derive(Debug, Error)]
pub enum GoodsError {
    /// No item carries the requested id.
    #[error("goods {0} not found")]
    NotFound(String),

    /// The collection could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for goods operations.
pub type Result<T> = std::result::Result<T, GoodsError>;

/// GoodsRepository serves the goods collection.
pub struct GoodsRepository {
    store: Arc<dyn DocumentStore>,
    ids: IdGenerator,
}

impl GoodsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            ids: IdGenerator::new(),
        }
    }

    /// Returns one page of the full collection.
    pub async fn list(&self, page: i64, page_size: i64) -> GoodsPage {
        GoodsPage::slice(self.load().await, page, page_size)
    }

    /// Returns one page of the entries flagged `isHot`.
    pub async fn list_hot(&self, page: i64, page_size: i64) -> GoodsPage {
        let hot = self.load().await.into_iter().filter(GoodsEntry::is_hot).collect();
        GoodsPage::slice(hot, page, page_size)
    }

    /// Creates an item at the head of the collection.
    pub async fn create(&self, fields: Map<String, Value>) -> Result<GoodsItem> {
        let mut entries = self.load().await;

        let id = self.ids.next(&entries);
        let item = GoodsItem::new(id, fields, timestamp());
        entries.insert(0, item.clone().into());

        self.save(&entries).await?;

        info!(id = %item.id, total = entries.len(), "Goods created");
        Ok(item)
    }

    /// Merges `patch` into the entry with `id`.
    pub async fn update(&self, id: &str, patch: Map<String, Value>) -> Result<GoodsEntry> {
        let mut entries = self.load().await;

        let entry = entries
            .iter_mut()
            .find(|entry| entry.id().as_deref() == Some(id))
            .ok_or_else(|| GoodsError::NotFound(id.to_string()))?;
        if !entry.apply(patch, timestamp()) {
            return Err(GoodsError::NotFound(id.to_string()));
        }
        let updated = entry.clone();

        self.save(&entries).await?;

        info!(id = %id, "Goods updated");
        Ok(updated)
    }

    /// Removes the entry with `id`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.load().await;

        let index = entries
            .iter()
            .position(|entry| entry.id().as_deref() == Some(id))
            .ok_or_else(|| GoodsError::NotFound(id.to_string()))?;
        entries.remove(index);

        self.save(&entries).await?;

        info!(id = %id, total = entries.len(), "Goods deleted");
        Ok(())
    }

    /// Loads the collection; an unreadable document reads as empty.
    async fn load(&self) -> Vec<GoodsEntry> {
        let value = read_or_fallback(self.store.as_ref(), Document::Goods).await;

        let values = match value {
            Value::Array(values) => values,
            other => {
                warn!(kind = %json_kind(&other), "Goods document is not an array, using empty list");
                return Vec::new();
            }
        };

        values
            .into_iter()
            .map(GoodsEntry::from_value)
            .inspect(|entry| {
                if let GoodsEntry::Raw(raw) = entry {
                    debug!(kind = %json_kind(raw), id = ?entry.id(), "Keeping unrecognized goods entry as is");
                }
            })
            .collect()
    }

    async fn save(&self, entries: &[GoodsEntry]) -> Result<()> {
        let value = serde_json::to_value(entries).map_err(StorageError::from)?;

        if let Err(e) = self.store.write(Document::Goods, &value).await {
            error!(error = %e, "Failed to save goods");
            return Err(e.into());
        }

        debug!(count = entries.len(), "Goods saved");
        Ok(())
    }
}

/// ISO-8601 UTC timestamp with millisecond precision.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
