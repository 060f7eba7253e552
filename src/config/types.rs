use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Site hosting the OLAC region, country and language pages
pub const DEFAULT_SITE_URL: &str = "http://www.language-archives.org";

/// Default base URL of the ingestion service used by the harvester
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";

/// Every region the archive publishes, in crawl order
pub const ALL_REGIONS: &[&str] = &["africa", "americas", "asia", "europe", "pacific"];

/// Main configuration structure for the harvester
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub harvest: HarvestConfig,
    pub reference: ReferenceConfig,
    pub service: ServiceConfig,
    pub output: OutputConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Run-mode constraint profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// One region, one country, one language
    Development,
    /// Two regions, ten countries each, ten languages
    Testing,
    /// Everything
    #[default]
    Full,
}

impl RunMode {
    /// Region names crawled by this mode
    pub fn regions(&self) -> &'static [&'static str] {
        match self {
            Self::Development => &["pacific"],
            Self::Testing => &["africa", "americas"],
            Self::Full => ALL_REGIONS,
        }
    }

    /// Countries expanded per region and languages processed per run
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Development => Some(1),
            Self::Testing => Some(10),
            Self::Full => None,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Full => "full",
        };
        write!(f, "{}", name)
    }
}

/// Crawl scope configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Constraint profile for the run
    pub mode: RunMode,

    /// Site root the region pages live under
    #[serde(rename = "site-url")]
    pub site_url: String,

    /// Explicit region page URLs, replacing the mode's regions
    pub regions: Vec<String>,

    /// Countries expanded per region, replacing the mode's limit
    #[serde(rename = "country-limit")]
    pub country_limit: Option<usize>,

    /// Languages processed per run, replacing the mode's limit
    #[serde(rename = "language-limit")]
    pub language_limit: Option<usize>,

    /// Write index.json next to the snapshots
    #[serde(rename = "write-index")]
    pub write_index: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            site_url: DEFAULT_SITE_URL.to_string(),
            regions: Vec::new(),
            country_limit: None,
            language_limit: None,
            write_index: false,
        }
    }
}

impl HarvestConfig {
    /// Region page URLs to crawl
    pub fn region_pages(&self) -> Vec<String> {
        if !self.regions.is_empty() {
            return self.regions.clone();
        }

        let site = self.site_url.trim_end_matches('/');
        self.mode
            .regions()
            .iter()
            .map(|region| format!("{}/area/{}", site, region))
            .collect()
    }

    /// Countries expanded per region
    pub fn country_limit(&self) -> Option<usize> {
        self.country_limit.or_else(|| self.mode.limit())
    }

    /// Languages processed per run
    pub fn language_limit(&self) -> Option<usize> {
        self.language_limit.or_else(|| self.mode.limit())
    }
}

/// Reference CSV locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// ISO language list
    pub languages: PathBuf,

    /// Glottolog languoid classification list
    pub languoids: PathBuf,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            languages: PathBuf::from("languages.csv"),
            languoids: PathBuf::from("languoid.csv"),
        }
    }
}

/// Ingestion service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL, without the endpoint path
    pub url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root folder; each run writes into a `YYYYMMDD` subfolder
    pub folder: PathBuf,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the harvester
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the harvester
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for harvester-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "OlacHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/olac-harvest/olac-harvest".to_string(),
            contact_email: "harvest@example.org".to_string(),
        }
    }
}
