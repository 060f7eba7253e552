//! Storage traits and error types
//!
//! This module defines the trait interface for snapshot stores and
//! associated error types.

use crate::crawler::IndexDocument;
use crate::storage::SnapshotDocument;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid snapshot key: {0:?}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for snapshot store implementations
///
/// A store holds the snapshots of a single run-date. The existence of a
/// language's snapshot is the only record that the language was handled
/// that day.
pub trait SnapshotStore {
    /// Date stamp (`YYYYMMDD`) of the snapshots in this store
    fn date_stamp(&self) -> &str;

    /// Returns true if a snapshot exists for the language code
    fn contains(&self, code: &str) -> bool;

    /// Persists a language snapshot, returning where it was written
    fn write_snapshot(&self, document: &SnapshotDocument) -> StorageResult<PathBuf>;

    /// Persists the crawl index
    fn write_index(&self, index: &IndexDocument) -> StorageResult<PathBuf>;
}
