//! Packs finished run folders into bzip2 tarballs

use crate::archive::ArchiveError;
use crate::storage::{date_stamp, is_date_stamp};
use bzip2::write::BzEncoder;
use bzip2::Compression;
use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Extension of run archives
pub const ARCHIVE_EXTENSION: &str = "tbz";

/// What an archiving pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Archives written, in folder-name order
    pub archived: Vec<PathBuf>,

    /// Folders left alone because they belong to today
    pub skipped_today: Vec<String>,
}

/// Archives every `YYYYMMDD` folder under `data` except today's
///
/// Entries that are not date-named directories are ignored. Folders are
/// processed in name order; the first failure stops the pass.
pub fn archive_data_root(data: &Path, today: NaiveDate) -> Result<ArchiveReport, ArchiveError> {
    let today = date_stamp(today);
    let mut report = ArchiveReport::default();

    let mut names = Vec::new();
    for entry in std::fs::read_dir(data).map_err(ArchiveError::io(data))? {
        let entry = entry.map_err(ArchiveError::io(data))?;
        let is_dir = entry
            .file_type()
            .map_err(ArchiveError::io(entry.path()))?
            .is_dir();
        if let (true, Ok(name)) = (is_dir, entry.file_name().into_string()) {
            names.push(name);
        }
    }
    names.sort();

    for name in names {
        if name.starts_with(&today) {
            tracing::info!("Skipping today: {}", name);
            report.skipped_today.push(name);
        } else if is_date_stamp(&name) {
            report.archived.push(archive_folder(data, &name)?);
        } else {
            tracing::debug!("Ignoring {}", name);
        }
    }

    Ok(report)
}

/// Packs `data/<name>` into `data/<name>.tbz`, then removes the folder
///
/// The archive is built under a temporary name, flushed to disk and renamed
/// into place; the folder is only removed once the final file exists and is
/// non-empty.
pub fn archive_folder(data: &Path, name: &str) -> Result<PathBuf, ArchiveError> {
    if !is_date_stamp(name) {
        return Err(ArchiveError::InvalidDate(name.to_string()));
    }

    let folder = data.join(name);
    if !folder.is_dir() {
        return Err(ArchiveError::MissingFolder { path: folder });
    }

    let archive = data.join(format!("{}.{}", name, ARCHIVE_EXTENSION));
    let partial = data.join(format!("{}.{}.partial", name, ARCHIVE_EXTENSION));
    tracing::info!("Archiving: {}", folder.display());

    if let Err(e) = write_archive(&partial, &folder, name) {
        if let Err(cleanup) = std::fs::remove_file(&partial) {
            tracing::warn!("Could not remove {}: {}", partial.display(), cleanup);
        }
        return Err(e);
    }

    std::fs::rename(&partial, &archive).map_err(ArchiveError::io(&archive))?;

    let written = std::fs::metadata(&archive)
        .map(|meta| meta.len() > 0)
        .unwrap_or(false);
    if !written {
        return Err(ArchiveError::NotWritten { path: archive });
    }

    std::fs::remove_dir_all(&folder).map_err(ArchiveError::io(&folder))?;
    tracing::debug!("Removed {}", folder.display());

    Ok(archive)
}

/// Writes `folder` as `name/...` into a bzip2 tarball at `partial` and syncs it
fn write_archive(partial: &Path, folder: &Path, name: &str) -> Result<(), ArchiveError> {
    let file = File::create(partial).map_err(ArchiveError::io(partial))?;
    let mut builder = tar::Builder::new(BzEncoder::new(file, Compression::best()));
    builder
        .append_dir_all(name, folder)
        .map_err(ArchiveError::io(folder))?;
    let encoder = builder.into_inner().map_err(ArchiveError::io(partial))?;
    let file = encoder.finish().map_err(ArchiveError::io(partial))?;
    file.sync_all().map_err(ArchiveError::io(partial))
}
