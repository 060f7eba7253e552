//! Archiving finished runs and replaying them with the admin credential

use crate::fixtures::*;
use chrono::NaiveDate;
use olac_harvest::archive::{archive_data_root, archive_folder, Reprocessor};
use olac_harvest::config::{ReprocessConfig, UserAgentConfig};
use olac_harvest::crawler::{build_http_client, RunController};
use olac_harvest::output::ADMIN_HEADER;
use olac_harvest::storage::INDEX_FILE;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PASSWORD: &str = "s3cret";

fn reprocessor(service: &MockServer, batch: usize) -> Reprocessor {
    let mut config =
        ReprocessConfig::with_credential(&service.uri(), Duration::ZERO, Some(PASSWORD.into()))
            .unwrap();
    config.pacing_batch = batch;
    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    Reprocessor::new(client, config)
}

async fn mount_replay_service(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("POST"))
        .and(path("/languages"))
        .and(header(ADMIN_HEADER, PASSWORD))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

fn write_day(data: &Path, stamp: &str, files: &[(&str, &str)]) {
    let day = data.join(stamp);
    std::fs::create_dir_all(&day).unwrap();
    for (name, body) in files {
        std::fs::write(day.join(name), body).unwrap();
    }
}

#[tokio::test]
async fn test_harvest_archive_and_replay() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    mount_language_pages(&site, &["bis", "fij", "hif"], 1).await;
    Mock::given(method("POST"))
        .and(path("/language"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&service)
        .await;
    mount_replay_service(&service, 200, 3).await;

    let mut config = test_config(&site, &service, &dir);
    config.harvest.write_index = true;
    RunController::for_date(config, run_date())
        .unwrap()
        .run()
        .await
        .unwrap();

    let data = data_root(&dir);
    let next_day = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let report = archive_data_root(&data, next_day).unwrap();

    assert_eq!(report.archived, vec![data.join(format!("{}.tbz", RUN_STAMP))]);
    assert!(!data.join(RUN_STAMP).exists());

    let stats = reprocessor(&service, 500)
        .replay_date(&data, RUN_STAMP)
        .await
        .unwrap();

    assert_eq!(stats.files, 3);
    assert_eq!(stats.submitted, 3);
    assert_eq!(stats.malformed, 0);
    assert_eq!(stats.pauses, 0);
    assert!(data.join(RUN_STAMP).join("fij.json").exists());
}

#[test]
fn test_archive_leaves_today_alone() {
    let dir = TempDir::new().unwrap();
    write_day(dir.path(), RUN_STAMP, &[("fij.json", "{}")]);
    std::fs::write(dir.path().join("notes.txt"), "keep").unwrap();

    let report = archive_data_root(dir.path(), run_date()).unwrap();

    assert!(report.archived.is_empty());
    assert_eq!(report.skipped_today, vec![RUN_STAMP.to_string()]);
    assert!(dir.path().join(RUN_STAMP).join("fij.json").exists());
    assert!(dir.path().join("notes.txt").exists());
}

#[tokio::test]
async fn test_replay_archive_file() {
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_replay_service(&service, 200, 2).await;

    write_day(
        dir.path(),
        "20240107",
        &[
            ("bis.json", r#"{"code":"bis","date":"20240107"}"#),
            ("fij.json", r#"{"code":"fij","date":"20240107"}"#),
        ],
    );
    let archive = archive_folder(dir.path(), "20240107").unwrap();
    assert!(!dir.path().join("20240107").exists());

    let stats = reprocessor(&service, 500)
        .replay_archive(&archive)
        .await
        .unwrap();

    assert_eq!(stats.submitted, 2);
}

#[tokio::test]
async fn test_replay_injects_date_and_skips_malformed() {
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_replay_service(&service, 200, 1).await;

    write_day(
        dir.path(),
        "20240105",
        &[
            ("aaa.json", r#"{"code":"aaa"}"#),
            ("bbb.json", "{truncated"),
            (INDEX_FILE, r#"{"languages":[]}"#),
        ],
    );

    let stats = reprocessor(&service, 500)
        .replay_date(dir.path(), "20240105")
        .await
        .unwrap();

    assert_eq!(stats.files, 2);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.submitted, 1);

    let requests = service.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["code"], "aaa");
    assert_eq!(body["date"], "20240105");
}

#[tokio::test]
async fn test_replay_pauses_after_each_batch() {
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_replay_service(&service, 200, 5).await;

    let files: Vec<(String, String)> = (1..=5)
        .map(|i| (format!("l{}.json", i), format!(r#"{{"code":"l{}"}}"#, i)))
        .collect();
    let files: Vec<(&str, &str)> = files
        .iter()
        .map(|(name, body)| (name.as_str(), body.as_str()))
        .collect();
    write_day(dir.path(), "20240106", &files);

    let stats = reprocessor(&service, 2)
        .replay_date(dir.path(), "20240106")
        .await
        .unwrap();

    assert_eq!(stats.submitted, 5);
    assert_eq!(stats.pauses, 2);
}

#[tokio::test]
async fn test_replay_continues_after_rejection() {
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_replay_service(&service, 500, 2).await;

    write_day(
        dir.path(),
        "20240108",
        &[("aaa.json", r#"{"code":"aaa"}"#), ("bbb.json", r#"{"code":"bbb"}"#)],
    );

    let stats = reprocessor(&service, 500)
        .replay_date(dir.path(), "20240108")
        .await
        .unwrap();

    assert_eq!(stats.rejected, 2);
    assert_eq!(stats.submitted, 0);
}

#[tokio::test]
async fn test_replay_rejects_bad_date() {
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let result = reprocessor(&service, 500)
        .replay_date(dir.path(), "2024-01-05")
        .await;
    assert!(result.is_err());

    let missing = reprocessor(&service, 500)
        .replay_date(dir.path(), "20240109")
        .await;
    assert!(missing.is_err());
}
