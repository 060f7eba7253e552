//! Replays archived snapshots against the ingestion service

use crate::archive::{ArchiveError, ARCHIVE_EXTENSION};
use crate::config::ReprocessConfig;
use crate::output::{IngestClient, ReplayStatistics, SubmitOutcome, LANGUAGES_ENDPOINT};
use crate::storage::{is_date_stamp, INDEX_FILE};
use crate::HarvestError;
use bzip2::read::BzDecoder;
use reqwest::Client;
use serde_json::Value;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Unpacks a run archive into `into`
///
/// Archives contain their `YYYYMMDD/` folder, so unpacking `20240101.tbz`
/// into `data` recreates `data/20240101/`.
pub fn extract_archive(archive: &Path, into: &Path) -> Result<(), ArchiveError> {
    tracing::info!("Extracting {}", archive.display());
    let file = File::open(archive).map_err(ArchiveError::io(archive))?;
    tar::Archive::new(BzDecoder::new(file))
        .unpack(into)
        .map_err(ArchiveError::io(archive))
}

/// Resubmits the snapshots of a past run-date
pub struct Reprocessor {
    ingest: IngestClient,
    config: ReprocessConfig,
}

impl Reprocessor {
    /// Creates a reprocessor posting to `{service}/languages` with the admin header
    pub fn new(client: Client, config: ReprocessConfig) -> Self {
        let ingest = IngestClient::new(client, &config.service_url, LANGUAGES_ENDPOINT)
            .with_admin_password(config.admin_password.clone());
        Self { ingest, config }
    }

    /// Replays the run-date `date` stored under `data`
    ///
    /// When `data/<date>.tbz` exists it is unpacked first.
    pub async fn replay_date(
        &self,
        data: &Path,
        date: &str,
    ) -> Result<ReplayStatistics, HarvestError> {
        if !is_date_stamp(date) {
            return Err(ArchiveError::InvalidDate(date.to_string()).into());
        }

        let archive = data.join(format!("{}.{}", date, ARCHIVE_EXTENSION));
        if archive.is_file() {
            extract_archive(&archive, data)?;
        }

        self.replay_folder(&data.join(date), date).await
    }

    /// Replays an archive file, unpacking it next to itself
    pub async fn replay_archive(&self, archive: &Path) -> Result<ReplayStatistics, HarvestError> {
        let date = archive
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| is_date_stamp(stem))
            .ok_or_else(|| ArchiveError::InvalidDate(archive.display().to_string()))?
            .to_string();
        let data = archive
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        extract_archive(archive, &data)?;
        self.replay_folder(&data.join(&date), &date).await
    }

    /// Submits every snapshot file in `folder`, in name order
    ///
    /// Files that are not a JSON object are skipped. Documents without a
    /// `date` get `date` injected. After every `pacing_batch` submissions the
    /// replay pauses for `pacing_pause`.
    pub async fn replay_folder(
        &self,
        folder: &Path,
        date: &str,
    ) -> Result<ReplayStatistics, HarvestError> {
        if !folder.is_dir() {
            return Err(ArchiveError::MissingFolder {
                path: folder.to_path_buf(),
            }
            .into());
        }

        let mut stats = ReplayStatistics::default();
        let mut sent = 0usize;

        for path in snapshot_files(folder)? {
            stats.files += 1;
            let file_name = path.display().to_string();
            tracing::info!("Processing: {}", file_name);

            let Some(document) = read_document(&path, date) else {
                tracing::warn!("Skipping malformed snapshot: {}", file_name);
                stats.malformed += 1;
                continue;
            };

            match self.ingest.submit(&document).await {
                Ok(SubmitOutcome::Accepted) => stats.submitted += 1,
                Ok(SubmitOutcome::Rejected { status }) => {
                    tracing::error!("Problem submitting: {} (HTTP {})", file_name, status);
                    stats.rejected += 1;
                }
                Err(e) => {
                    tracing::error!("Problem submitting: {} ({})", file_name, e);
                    stats.submission_errors += 1;
                }
            }

            sent += 1;
            if self.config.pacing_batch > 0 && sent % self.config.pacing_batch == 0 {
                tracing::info!(
                    "Submitted {} records, pausing for {:?}",
                    sent,
                    self.config.pacing_pause
                );
                stats.pauses += 1;
                tokio::time::sleep(self.config.pacing_pause).await;
            }
        }

        Ok(stats)
    }
}

/// `.json` snapshot files of a day folder, sorted, without the crawl index
fn snapshot_files(folder: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(ArchiveError::io(folder))? {
        let path = entry.map_err(ArchiveError::io(folder))?.path();
        let is_index = path.file_name().is_some_and(|name| name == INDEX_FILE);
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if path.is_file() && is_json && !is_index {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads a snapshot, injecting `date` if absent; None if it is not a JSON object
fn read_document(path: &Path, date: &str) -> Option<Value> {
    let bytes = std::fs::read(path).ok()?;
    let mut value: Value = serde_json::from_slice(&bytes).ok()?;

    let object = value.as_object_mut()?;
    object
        .entry("date")
        .or_insert_with(|| Value::String(date.to_string()));

    Some(value)
}
