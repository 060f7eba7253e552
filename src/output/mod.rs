//! Output module for publishing records and reporting runs
//!
//! This module handles:
//! - Submitting records to the ingestion service
//! - Recording run and replay statistics

mod ingest;
pub mod stats;

pub use ingest::{
    IngestClient, SubmitOutcome, ADMIN_HEADER, LANGUAGES_ENDPOINT, LANGUAGE_ENDPOINT,
};
pub use stats::{print_replay_statistics, print_statistics, ReplayStatistics, RunStatistics};
