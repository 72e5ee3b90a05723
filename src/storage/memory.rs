//! In-memory implementation of DocumentStore.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::storage::{Document, DocumentStore, StorageError};

/// MemoryStore holds documents in a map, seeded with their initial values.
#[derive(Debug)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Document, Value>>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        let documents = Document::ALL
            .into_iter()
            .map(|doc| (doc, doc.initial_value()))
            .collect();

        Self {
            documents: RwLock::new(documents),
            reject_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Drops a document so that reads fail.
    pub async fn remove(&self, doc: Document) {
        self.documents.write().await.remove(&doc);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, doc: Document) -> Result<Value, StorageError> {
        self.documents.read().await.get(&doc).cloned().ok_or_else(|| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} document missing", doc),
            ))
        })
    }

    async fn write(&self, doc: Document, value: &Value) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected(format!("{} is read-only", doc)));
        }

        self.documents.write().await.insert(doc, value.clone());
        Ok(())
    }
}
