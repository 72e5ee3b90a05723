//! Storage interfaces and implementations for the persisted JSON documents.

mod json_file;
#[cfg(test)]
mod memory;

pub use json_file::JsonFileStore;
#[cfg(test)]
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::warn;

/// Document names one of the persisted JSON documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// Affiliate API settings object.
    Settings,
    /// Goods array.
    Goods,
}

impl Document {
    /// All documents, in bootstrap order.
    pub const ALL: [Document; 2] = [Document::Settings, Document::Goods];

    /// File name of the document inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Document::Settings => "config.json",
            Document::Goods => "goods.json",
        }
    }

    /// Content written on first boot.
    pub fn initial_value(&self) -> Value {
        match self {
            Document::Settings => json!({ "apiUrl": "", "appKey": "", "appSecret": "" }),
            Document::Goods => json!([]),
        }
    }

    /// Content assumed when the document cannot be read.
    pub fn fallback_value(&self) -> Value {
        match self {
            Document::Settings => json!({}),
            Document::Goods => json!([]),
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Document::Settings => write!(f, "settings"),
            Document::Goods => write!(f, "goods"),
        }
    }
}

/// DocumentStore reads and rewrites whole JSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read returns the current content of the document.
    async fn read(&self, doc: Document) -> Result<Value, StorageError>;

    /// Write replaces the document with `value`.
    async fn write(&self, doc: Document, value: &Value) -> Result<(), StorageError>;
}

/// Reads `doc`, substituting its fallback value on any failure.
pub async fn read_or_fallback(store: &dyn DocumentStore, doc: Document) -> Value {
    match store.read(doc).await {
        Ok(value) => value,
        Err(e) => {
            warn!(document = %doc, error = %e, "Failed to read document, using fallback");
            doc.fallback_value()
        }
    }
}

/// StorageError represents errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(#[from] serde_json::Error),

    #[error("Write rejected: {0}")]
    Rejected(String),
}
