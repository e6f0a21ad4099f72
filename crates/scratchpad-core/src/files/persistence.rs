//! Snapshot persistence of the virtual file set.
//!
//! The snapshot is a JSON array of `{name, content}` objects stored under a
//! single key. There is no schema versioning: anything that fails to parse
//! is treated as "no prior state".

use super::model::FileRecord;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Loads a previously saved file set.
///
/// Returns `None` when the key is absent, the store cannot be read, or the
/// stored value is not a valid snapshot. None of these are surfaced as
/// errors; callers fall back to the default seed.
pub async fn load_files(store: &dyn KeyValueStore, key: &str) -> Option<Vec<FileRecord>> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("[Storage] No saved file set under '{}'", key);
            return None;
        }
        Err(e) => {
            tracing::warn!("[Storage] Failed to read '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_str::<Vec<FileRecord>>(&raw) {
        Ok(records) => {
            tracing::debug!(
                "[Storage] Restored {} file(s) from '{}'",
                records.len(),
                key
            );
            Some(records)
        }
        Err(e) => {
            tracing::warn!("[Storage] Ignoring unparsable file set under '{}': {}", key, e);
            None
        }
    }
}

/// Writes `records` as a snapshot under `key`.
pub async fn save_files(
    store: &dyn KeyValueStore,
    key: &str,
    records: &[FileRecord],
) -> Result<()> {
    let raw = serde_json::to_string(records)?;
    store.set(key, raw).await?;
    tracing::debug!("[Storage] Saved {} file(s) to '{}'", records.len(), key);
    Ok(())
}
