//! # Corpus Persistence
//!
//! JSON file persistence for the record store.
//!
//! The corpus lives in a single JSON array of records. The file is read
//! once at startup and rewritten after every successful mutation; the
//! engines themselves never touch the filesystem.

use shelfmark_core::{MemoryStore, PaperRecord, RecordStore, ShelfmarkError};
use std::path::Path;

/// Maximum data file size (50 MB). A paper log larger than this is
/// almost certainly a corrupted or hostile file.
const MAX_DATA_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Load a store from the data file.
///
/// A missing file is an empty corpus, not an error, so first runs need
/// no init step.
pub fn load_store(path: &Path) -> Result<MemoryStore, ShelfmarkError> {
    if !path.exists() {
        tracing::debug!("No data file at {}, starting empty", path.display());
        return Ok(MemoryStore::new());
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| ShelfmarkError::Io(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_DATA_FILE_SIZE {
        return Err(ShelfmarkError::Io(format!(
            "Data file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_DATA_FILE_SIZE
        )));
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| ShelfmarkError::Io(format!("Cannot read {}: {}", path.display(), e)))?;
    let records: Vec<PaperRecord> = serde_json::from_str(&raw)
        .map_err(|e| ShelfmarkError::Serialization(format!("Malformed data file: {}", e)))?;

    tracing::debug!("Loaded {} papers from {}", records.len(), path.display());
    Ok(MemoryStore::from_records(records))
}

/// Write the store snapshot back to the data file.
///
/// Writes to a sibling temp file first and renames over the target, so a
/// crash mid-write cannot truncate the corpus.
pub fn save_store(path: &Path, store: &MemoryStore) -> Result<(), ShelfmarkError> {
    let records = store.all();
    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| ShelfmarkError::Serialization(e.to_string()))?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .map_err(|e| ShelfmarkError::Io(format!("Cannot write {}: {}", tmp.display(), e)))?;
    std::fs::rename(&tmp, path)
        .map_err(|e| ShelfmarkError::Io(format!("Cannot replace {}: {}", path.display(), e)))?;

    tracing::debug!("Saved {} papers to {}", records.len(), path.display());
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
