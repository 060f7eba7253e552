//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for both the OLAC site and the
//! ingestion service, and run the harvest, archive and replay stages
//! end-to-end against temporary data folders.

mod archive_tests;
mod fixtures;
mod pipeline_tests;
