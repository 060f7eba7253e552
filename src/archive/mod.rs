//! Archive module for past run folders
//!
//! Day folders older than today are packed into `<YYYYMMDD>.tbz`
//! (tar + bzip2) next to where they lived, and can later be unpacked and
//! replayed against the ingestion service.

mod archiver;
mod reprocess;

pub use archiver::{archive_data_root, archive_folder, ArchiveReport, ARCHIVE_EXTENSION};
pub use reprocess::{extract_archive, Reprocessor};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while packing or unpacking run folders
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Archive {path} was not written")]
    NotWritten { path: PathBuf },

    #[error("Not a run-date folder: {0}")]
    InvalidDate(String),

    #[error("Run folder not found: {path}")]
    MissingFolder { path: PathBuf },
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
