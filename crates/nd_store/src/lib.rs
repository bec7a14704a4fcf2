//! File-backed article store. The whole collection lives in one JSON
//! document that is read and replaced wholesale; `load` and `save` are the
//! only access points to it.

use std::path::{Path, PathBuf};

use nd_core::{Collection, Error, Result};
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes load-mutate-save round trips. Callers that intend to
    /// `save` must hold this guard from before their `load` until after the
    /// write, so the two schedulers never interleave against the document.
    pub async fn lock_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Reads the persisted collection. A missing document is an empty
    /// collection; a document that exists but does not parse is an error,
    /// which serving paths must surface to the caller.
    pub async fn load(&self) -> Result<Collection> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Collection::default())
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes).map_err(|source| Error::CorruptStore {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Write-path read: an unreadable document is treated as empty so the
    /// next `save` overwrites it and the pipeline heals instead of stalling.
    pub async fn load_or_empty(&self) -> Collection {
        match self.load().await {
            Ok(collection) => collection,
            Err(err) => {
                warn!("unreadable store, starting from empty: {}", err);
                Collection::default()
            }
        }
    }

    /// Replaces the document atomically: the collection is written to a
    /// sibling temp file and renamed over the target, so a concurrent `load`
    /// sees either the old document or the new one, never a partial write.
    pub async fn save(&self, collection: &Collection) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(collection)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").field("path", &self.path).finish()
    }
}
