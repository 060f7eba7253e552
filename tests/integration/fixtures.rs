//! Mock catalog pages and reference lists shared by the integration tests

use chrono::NaiveDate;
use olac_harvest::config::{Config, RunMode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run-date used by every harvest in these tests
pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

pub const RUN_STAMP: &str = "20240102";

/// ISO list: 8-column rows, coordinates in columns 4 and 6
pub const LANGUAGES_CSV: &str = "\
fij,I,Fijian,L,-17.8,x,178.0,y
hif,I,Fiji Hindi,L,-18.0,x,178.4,y
bis,I,Bislama,L,-15.4,x,167.0,y
";

/// Languoid list: ISO code in column 9
pub const LANGUOIDS_CSV: &str = "\
fiji1243,aust1307,east2712,,,language,safe,,,fij
fiji1242,indo1319,hind1270,,,language,safe,,,hif
";

const REGION_PAGE: &str = r#"<html><body>
<table><tr><td>Regions</td></tr></table>
<table><tr><td><ul>
<li><a href="/country/FJ">Fiji</a> (2)</li>
<li><a href="/country/VU">Vanuatu</a> (2)</li>
</ul></td></tr></table>
</body></html>"#;

const FIJI_PAGE: &str = r#"<html><body>
<table><tr><td>Countries</td></tr></table>
<table><tr><td><ul>
<li><a href="/language/fij">Fijian</a> (12)</li>
<li><a href="/language/hif">Fiji Hindi</a> (3)</li>
</ul></td></tr></table>
</body></html>"#;

const VANUATU_PAGE: &str = r#"<html><body>
<table><tr><td>Countries</td></tr></table>
<table><tr><td><ul>
<li><a href="/language/bis">Bislama</a> (7)</li>
<li><a href="/language/zzz">Unlisted</a> (1)</li>
</ul></td></tr></table>
</body></html>"#;

fn language_page(name: &str) -> String {
    format!(
        r#"<html><body>
<h3>Primary texts</h3>
<ol>
<li><span class="online_indicator">online</span><a href="/item/{name}-1">{name} stories</a></li>
<li><em>Field notes</em></li>
</ol>
<h3>Lexical resources</h3>
<ol><li><a href="/item/{name}-2">{name} dictionary</a></li></ol>
</body></html>"#
    )
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("content-type", "text/html")
}

/// Mounts the region and country pages
pub async fn mount_catalog(server: &MockServer) {
    for (page, body) in [
        ("/area/pacific", REGION_PAGE),
        ("/country/FJ", FIJI_PAGE),
        ("/country/VU", VANUATU_PAGE),
    ] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html(body))
            .mount(server)
            .await;
    }
}

/// Mounts the detail page of each code, each expected `times` times
pub async fn mount_language_pages(server: &MockServer, codes: &[&str], times: u64) {
    for code in codes {
        Mock::given(method("GET"))
            .and(path(format!("/language/{}", code)))
            .respond_with(html(language_page(code)))
            .expect(times)
            .mount(server)
            .await;
    }
}

/// Writes both reference lists into `dir`
pub fn write_reference_files(dir: &Path) -> (PathBuf, PathBuf) {
    let languages = dir.join("languages.csv");
    let languoids = dir.join("languoid.csv");
    std::fs::write(&languages, LANGUAGES_CSV).unwrap();
    std::fs::write(&languoids, LANGUOIDS_CSV).unwrap();
    (languages, languoids)
}

/// A full-mode configuration pointing at the mock site and service
pub fn test_config(site: &MockServer, service: &MockServer, dir: &TempDir) -> Config {
    let (languages, languoids) = write_reference_files(dir.path());

    let mut config = Config::default();
    config.harvest.mode = RunMode::Full;
    config.harvest.site_url = site.uri();
    config.harvest.regions = vec![format!("{}/area/pacific", site.uri())];
    config.reference.languages = languages;
    config.reference.languoids = languoids;
    config.service.url = service.uri();
    config.output.folder = data_root(dir);
    config
}

/// Data folder inside the test directory
pub fn data_root(dir: &TempDir) -> PathBuf {
    dir.path().join("data")
}

/// Reads a snapshot written for the test run-date
pub fn read_snapshot(dir: &TempDir, code: &str) -> serde_json::Value {
    let path = data_root(dir)
        .join(RUN_STAMP)
        .join(format!("{}.json", code));
    let bytes = std::fs::read(&path).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
