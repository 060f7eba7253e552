//! Storage module for persisting run snapshots
//!
//! Each run writes one JSON document per language into a folder named after
//! the run-date. The folder doubles as the resumption record: a language
//! whose document already exists is not fetched or submitted again that day.

mod snapshot;
mod traits;

pub use snapshot::{DailySnapshotStore, SnapshotDocument, INDEX_FILE};
pub use traits::{SnapshotStore, StorageError, StorageResult};

use chrono::NaiveDate;

/// Formats a run-date as `YYYYMMDD`
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Returns true if a name is a `YYYYMMDD` date stamp
pub fn is_date_stamp(name: &str) -> bool {
    name.len() == 8 && name.bytes().all(|b| b.is_ascii_digit())
}
