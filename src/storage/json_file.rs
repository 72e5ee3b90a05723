//! File-backed implementation of DocumentStore.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::storage::{Document, DocumentStore, StorageError};

/// JsonFileStore keeps each document as a pretty-printed JSON file in one directory.
///
/// There is no locking; concurrent writers race and the last write wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens the store, creating the directory and any missing document.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;

        let store = Self { dir };

        for doc in Document::ALL {
            let path = store.path(doc);
            if !fs::try_exists(&path).await? {
                store.write(doc, &doc.initial_value()).await?;
                info!(path = %path.display(), "Document initialized");
            }
        }

        Ok(store)
    }

    /// Returns the directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, doc: Document) -> PathBuf {
        self.dir.join(doc.file_name())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn read(&self, doc: Document) -> Result<Value, StorageError> {
        let content = fs::read_to_string(self.path(doc)).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn write(&self, doc: Document, value: &Value) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(self.path(doc), content).await?;

        debug!(document = %doc, "Document written");
        Ok(())
    }
}
