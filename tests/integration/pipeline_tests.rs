//! End-to-end harvest runs against a mock OLAC site and ingestion service

use crate::fixtures::*;
use olac_harvest::crawler::RunController;
use olac_harvest::state::RunState;
use olac_harvest::storage::INDEX_FILE;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_service(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("POST"))
        .and(path("/language"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_run() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    mount_language_pages(&site, &["bis", "fij", "hif"], 1).await;
    mount_service(&service, 200, 3).await;

    let config = test_config(&site, &service, &dir);
    let mut controller = RunController::for_date(config, run_date()).unwrap();
    let stats = controller.run().await.unwrap();

    assert_eq!(controller.state(), RunState::Done);
    assert_eq!(stats.languages_indexed, 4);
    assert_eq!(stats.unclassified, 1);
    assert_eq!(stats.processed, 3);
    assert_eq!(stats.submitted, 3);
    assert_eq!(stats.unresolved, vec!["zzz".to_string()]);
    assert_eq!(stats.unreachable_pages, 0);

    let fij = read_snapshot(&dir, "fij");
    assert_eq!(fij["date"], RUN_STAMP);
    assert_eq!(fij["name"], "Fijian");
    assert_eq!(fij["coords"], json!(["-17.8", "178.0"]));
    assert_eq!(fij["glotto_id"], "fiji1243");
    assert_eq!(fij["glotto_family_id"], "aust1307");
    assert_eq!(fij["level"], "language");
    assert_eq!(fij["url"], format!("{}/language/fij", site.uri()));

    let primary = &fij["resources"]["Primary texts"];
    assert_eq!(primary["count"], 2);
    assert_eq!(primary["resources"][0]["is_online"], true);
    assert_eq!(
        primary["resources"][0]["url"],
        format!("{}/item/fij-1", site.uri())
    );
    assert_eq!(primary["resources"][0]["name"], "fij stories");
    assert_eq!(primary["resources"][1]["text"], "<em>Field notes</em>");
    assert!(primary["resources"][1].get("is_online").is_none());
    assert_eq!(fij["resources"]["Lexical resources"]["count"], 1);

    let bis = read_snapshot(&dir, "bis");
    assert_eq!(bis["glotto_id"], "");
    assert_eq!(bis["coords"], json!(["-15.4", "167.0"]));

    let requests = service.received_requests().await.unwrap();
    let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(first["code"], "bis");
    assert_eq!(first["date"], RUN_STAMP);
}

#[tokio::test]
async fn test_second_run_same_day_skips_processed_languages() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    // Detail pages and submissions happen once across both runs
    mount_language_pages(&site, &["bis", "fij", "hif"], 1).await;
    mount_service(&service, 200, 3).await;

    let config = test_config(&site, &service, &dir);
    let first = RunController::for_date(config.clone(), run_date())
        .unwrap()
        .run()
        .await
        .unwrap();
    assert_eq!(first.processed, 3);

    let second = RunController::for_date(config, run_date())
        .unwrap()
        .run()
        .await
        .unwrap();
    assert_eq!(second.processed, 0);
    assert_eq!(second.already_processed, 3);
    assert_eq!(second.submitted, 0);
    assert_eq!(second.unresolved, vec!["zzz".to_string()]);
}

#[tokio::test]
async fn test_unresolved_code_writes_nothing() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    mount_language_pages(&site, &["bis", "fij", "hif"], 1).await;
    mount_language_pages(&site, &["zzz"], 0).await;
    mount_service(&service, 200, 3).await;

    let config = test_config(&site, &service, &dir);
    RunController::for_date(config, run_date())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(!data_root(&dir).join(RUN_STAMP).join("zzz.json").exists());
}

#[tokio::test]
async fn test_rejected_submissions_do_not_stop_the_run() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    mount_language_pages(&site, &["bis", "fij", "hif"], 1).await;
    mount_service(&service, 500, 3).await;

    let config = test_config(&site, &service, &dir);
    let stats = RunController::for_date(config, run_date())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(stats.processed, 3);
    assert_eq!(stats.rejected, 3);
    assert_eq!(stats.submitted, 0);
    // Persisted before submission, so a rerun today would not resubmit
    assert_eq!(read_snapshot(&dir, "hif")["code"], "hif");
}

#[tokio::test]
async fn test_unreachable_detail_page_keeps_empty_resources() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    mount_language_pages(&site, &["fij", "hif"], 1).await;
    mount_service(&service, 200, 3).await;

    let config = test_config(&site, &service, &dir);
    let stats = RunController::for_date(config, run_date())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(stats.unreachable_pages, 1);
    assert_eq!(stats.submitted, 3);
    assert_eq!(read_snapshot(&dir, "bis")["resources"], json!({}));
}

#[tokio::test]
async fn test_region_page_failure_is_fatal() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_service(&service, 200, 0).await;

    let config = test_config(&site, &service, &dir);
    let mut controller = RunController::for_date(config, run_date()).unwrap();
    let error = controller.run().await.unwrap_err();

    assert!(error.is_unreachable());
    assert_eq!(controller.state(), RunState::Unified);
    assert!(!data_root(&dir).join(RUN_STAMP).exists());
}

#[tokio::test]
async fn test_missing_reference_file_is_fatal() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let mut config = test_config(&site, &service, &dir);
    config.reference.languages = dir.path().join("missing.csv");

    let mut controller = RunController::for_date(config, run_date()).unwrap();
    assert!(controller.run().await.is_err());
    assert_eq!(controller.state(), RunState::Pending);
}

#[tokio::test]
async fn test_language_limit_stops_processing() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    mount_language_pages(&site, &["bis", "fij"], 1).await;
    mount_language_pages(&site, &["hif"], 0).await;
    mount_service(&service, 200, 2).await;

    let mut config = test_config(&site, &service, &dir);
    config.harvest.language_limit = Some(2);

    let stats = RunController::for_date(config, run_date())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(stats.processed, 2);
    assert!(!data_root(&dir).join(RUN_STAMP).join("hif.json").exists());
}

#[tokio::test]
async fn test_country_limit_expands_first_countries_only() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    mount_language_pages(&site, &["fij", "hif"], 1).await;
    mount_language_pages(&site, &["bis"], 0).await;
    mount_service(&service, 200, 2).await;

    let mut config = test_config(&site, &service, &dir);
    config.harvest.country_limit = Some(1);

    let stats = RunController::for_date(config, run_date())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(stats.languages_indexed, 2);
    assert_eq!(stats.processed, 2);
}

#[tokio::test]
async fn test_write_index() {
    let site = MockServer::start().await;
    let service = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_catalog(&site).await;
    mount_language_pages(&site, &["bis", "fij", "hif"], 1).await;
    mount_service(&service, 200, 3).await;

    let mut config = test_config(&site, &service, &dir);
    config.harvest.write_index = true;

    RunController::for_date(config, run_date())
        .unwrap()
        .run()
        .await
        .unwrap();

    let bytes = std::fs::read(data_root(&dir).join(RUN_STAMP).join(INDEX_FILE)).unwrap();
    let index: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(index["languages"], json!(["bis", "fij", "hif", "zzz"]));
    assert_eq!(index["countries"]["Vanuatu"]["country_code"], "VU");
    assert_eq!(index["regions"]["pacific"][0]["name"], "Fiji");
    assert_eq!(index["regions"]["pacific"][0]["count"], "2");
}
