//! Filesystem snapshot store
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! └── YYYYMMDD/
//!     ├── <code>.json     # One document per language
//!     └── index.json      # Optional crawl index
//! ```
//!
//! The day folder is created on first write. Files are written to a
//! temporary name and renamed into place, so a crash never leaves a
//! truncated snapshot behind to be mistaken for a finished language.

use crate::catalog::LanguageRecord;
use crate::crawler::IndexDocument;
use crate::storage::traits::{SnapshotStore, StorageError, StorageResult};
use crate::storage::date_stamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the crawl index file inside a day folder
pub const INDEX_FILE: &str = "index.json";

/// A language record as persisted and submitted, stamped with the run-date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub date: String,
    #[serde(flatten)]
    pub record: LanguageRecord,
}

impl SnapshotDocument {
    pub fn new(date: impl Into<String>, record: LanguageRecord) -> Self {
        Self {
            date: date.into(),
            record,
        }
    }
}

/// Snapshot store rooted at `{root}/{YYYYMMDD}`
#[derive(Debug, Clone)]
pub struct DailySnapshotStore {
    dir: PathBuf,
    stamp: String,
}

impl DailySnapshotStore {
    /// Creates a store for the given run-date; nothing is created on disk yet
    pub fn new(root: impl AsRef<Path>, date: NaiveDate) -> Self {
        let stamp = date_stamp(date);
        Self {
            dir: root.as_ref().join(&stamp),
            stamp,
        }
    }

    /// The day folder
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a language's snapshot
    pub fn snapshot_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{}.json", code))
    }

    fn ensure_dir(&self) -> StorageResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    /// Write bytes atomically (write to temp, then rename)
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        self.ensure_dir()?;

        let io_err = |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };
        let tmp = path.with_extension("json.tmp");
        let mut file = std::fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(bytes).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        drop(file);

        std::fs::rename(&tmp, path).map_err(io_err)
    }
}

impl SnapshotStore for DailySnapshotStore {
    fn date_stamp(&self) -> &str {
        &self.stamp
    }

    fn contains(&self, code: &str) -> bool {
        validate_key(code).is_ok() && self.snapshot_path(code).exists()
    }

    fn write_snapshot(&self, document: &SnapshotDocument) -> StorageResult<PathBuf> {
        validate_key(&document.record.code)?;

        let path = self.snapshot_path(&document.record.code);
        let bytes = serde_json::to_vec(document)?;
        self.write_bytes(&path, &bytes)?;

        tracing::debug!("Wrote snapshot {}", path.display());
        Ok(path)
    }

    fn write_index(&self, index: &IndexDocument) -> StorageResult<PathBuf> {
        let path = self.dir.join(INDEX_FILE);
        let bytes = serde_json::to_vec(index)?;
        self.write_bytes(&path, &bytes)?;
        Ok(path)
    }
}

/// Language codes become file names; reject anything that is not a plain name
fn validate_key(code: &str) -> StorageResult<()> {
    if code.is_empty()
        || code == "index"
        || code.starts_with('.')
        || code.contains(['/', '\\'])
    {
        return Err(StorageError::InvalidKey(code.to_string()));
    }
    Ok(())
}
