//! Filesystem-backed key/value store.
//!
//! All keys live in one JSON object document. Writes go through a temporary
//! sibling file that is flushed and then renamed over the target, so a crash
//! mid-write never leaves a truncated document behind. Read-modify-write
//! cycles hold an advisory lock on a sibling `.{name}.lock` file so that two
//! processes sharing the store do not drop each other's keys.

use async_trait::async_trait;
use fs2::FileExt;
use scratchpad_core::error::{BridgeError, Result};
use scratchpad_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

type Document = BTreeMap<String, String>;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document. A missing or blank file is an empty document.
    async fn load(&self) -> Result<Document> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, document: &Document) -> Result<()> {
        self.ensure_parent().await?;

        let json = serde_json::to_string_pretty(document)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = tokio::fs::File::create(&tmp_path).await?;
        tmp_file.write_all(json.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    async fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        self.sibling_path("tmp")
    }

    fn lock_path(&self) -> Result<PathBuf> {
        self.sibling_path("lock")
    }

    /// `.{file_name}.{suffix}` next to the document.
    fn sibling_path(&self, suffix: &str) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| BridgeError::storage(format!("Invalid store path: {:?}", self.path)))?;
        let mut name = std::ffi::OsString::from(".");
        name.push(file_name);
        name.push(".");
        name.push(suffix);
        Ok(self.path.with_file_name(name))
    }

    /// Takes the cross-process lock for a read-modify-write cycle.
    async fn acquire_lock(&self) -> Result<FileLock> {
        self.ensure_parent().await?;
        FileLock::acquire(self.lock_path()?).await
    }
}

/// Exclusive advisory lock on a lock file, released when dropped.
///
/// The lock file itself is left in place: unlinking it would let a waiter
/// lock an inode that a newcomer can no longer see.
#[derive(Debug)]
struct FileLock {
    file: File,
}

impl FileLock {
    async fn acquire(lock_path: PathBuf) -> Result<Self> {
        tokio::task::spawn_blocking(move || -> Result<Self> {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&lock_path)?;
            FileExt::lock_exclusive(&file).map_err(|e| {
                BridgeError::storage(format!("Failed to lock {:?}: {}", lock_path, e))
            })?;
            Ok(Self { file })
        })
        .await
        .map_err(|e| BridgeError::storage(format!("Lock task failed: {}", e)))?
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let document = self.load().await?;
        Ok(document.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let _file_lock = self.acquire_lock().await?;
        let mut document = self.load().await?;
        document.insert(key.to_string(), value);
        self.save(&document).await?;
        tracing::debug!("[Storage] Wrote key '{}' to {:?}", key, self.path);
        Ok(())
    }
}
