//! Run controller - main harvest orchestration logic
//!
//! This module drives a harvest run through its states:
//! - Loading both reference lists
//! - Unifying them into enriched language records
//! - Crawling regions and countries into the language index
//! - Processing every indexed language: fetch, persist, submit
//!
//! Only failures of a single language while processing are tolerated; any
//! other failure ends the run.

use crate::catalog::{LanguageRecord, ReferenceCatalog};
use crate::config::Config;
use crate::crawler::country::{crawl_countries, Country};
use crate::crawler::index::{IndexDocument, IndexedLanguage, LanguageIndex};
use crate::crawler::region::{crawl_regions, Region};
use crate::crawler::resources::crawl_resources;
use crate::crawler::build_http_client;
use crate::output::{IngestClient, RunStatistics, SubmitOutcome, LANGUAGE_ENDPOINT};
use crate::state::RunState;
use crate::storage::{today, DailySnapshotStore, SnapshotDocument, SnapshotStore};
use crate::HarvestError;
use chrono::NaiveDate;
use reqwest::Client;

/// What happened to a single indexed language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageOutcome {
    /// The code is not in the ISO list; nothing was fetched or written
    Unresolved,

    /// Today's snapshot already exists; nothing was fetched or submitted
    AlreadyProcessed,

    /// Persisted and accepted by the service
    Submitted,

    /// Persisted, but the service answered with another status
    Rejected { status: u16 },

    /// Persisted, but the submission never reached the service
    SubmissionFailed { error: String },
}

impl LanguageOutcome {
    /// Returns true if the language went through fetch and persist
    pub fn was_processed(&self) -> bool {
        matches!(
            self,
            Self::Submitted | Self::Rejected { .. } | Self::SubmissionFailed { .. }
        )
    }
}

/// Crawl products kept for the processing stage
#[derive(Debug, Clone, Default)]
pub struct CrawlIndex {
    pub regions: Vec<Region>,
    pub countries: Vec<Country>,
    pub languages: LanguageIndex,
}

/// Main harvest controller structure
pub struct RunController {
    config: Config,
    client: Client,
    ingest: IngestClient,
    store: Box<dyn SnapshotStore>,
    state: RunState,
    stats: RunStatistics,
}

impl RunController {
    /// Creates a controller writing today's snapshots
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        Self::for_date(config, today())
    }

    /// Creates a controller writing the snapshots of the given run-date
    pub fn for_date(config: Config, date: NaiveDate) -> Result<Self, HarvestError> {
        let store = DailySnapshotStore::new(&config.output.folder, date);
        Self::with_store(config, Box::new(store))
    }

    /// Creates a controller on top of an existing snapshot store
    pub fn with_store(
        config: Config,
        store: Box<dyn SnapshotStore>,
    ) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent)?;
        let ingest = IngestClient::new(client.clone(), &config.service.url, LANGUAGE_ENDPOINT);

        Ok(Self {
            config,
            client,
            ingest,
            store,
            state: RunState::Pending,
            stats: RunStatistics::default(),
        })
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Statistics collected so far
    pub fn statistics(&self) -> &RunStatistics {
        &self.stats
    }

    /// Runs every stage in order and returns the run statistics
    pub async fn run(&mut self) -> Result<RunStatistics, HarvestError> {
        tracing::info!(
            "Starting {} run for {}",
            self.config.harvest.mode,
            self.store.date_stamp()
        );

        let catalog = self.load_catalog()?;
        let catalog = self.unify_catalog(catalog)?;
        let crawl = self.build_index().await?;
        self.process_languages(&catalog, &crawl.languages).await?;

        if self.config.harvest.write_index {
            let path = self
                .store
                .write_index(&IndexDocument::new(&crawl.regions, &crawl.languages))?;
            tracing::info!("Wrote crawl index to {}", path.display());
        }

        self.advance(RunState::Done)?;
        tracing::info!(
            "Run complete: {} processed, {} already processed, {} unresolved",
            self.stats.processed,
            self.stats.already_processed,
            self.stats.unresolved.len()
        );

        Ok(self.stats.clone())
    }

    /// Loads both reference lists
    pub fn load_catalog(&mut self) -> Result<ReferenceCatalog, HarvestError> {
        let catalog = ReferenceCatalog::load(&self.config.reference)?;
        self.advance(RunState::Loaded)?;
        Ok(catalog)
    }

    /// Enriches the loaded records with their languoid classification
    pub fn unify_catalog(
        &mut self,
        catalog: ReferenceCatalog,
    ) -> Result<ReferenceCatalog, HarvestError> {
        let catalog = catalog.unify();
        self.stats.unclassified = catalog.unclassified_count();
        self.advance(RunState::Unified)?;
        Ok(catalog)
    }

    /// Crawls regions and countries and builds the language index
    pub async fn build_index(&mut self) -> Result<CrawlIndex, HarvestError> {
        let pages = self.config.harvest.region_pages();
        let regions = crawl_regions(&self.client, &pages).await?;
        let countries =
            crawl_countries(&self.client, &regions, self.config.harvest.country_limit()).await?;
        let languages = LanguageIndex::build(&countries);

        self.stats.languages_indexed = languages.len();
        self.advance(RunState::Indexed)?;

        Ok(CrawlIndex {
            regions,
            countries,
            languages,
        })
    }

    /// Processes every indexed language, up to the run's language limit
    pub async fn process_languages(
        &mut self,
        catalog: &ReferenceCatalog,
        index: &LanguageIndex,
    ) -> Result<(), HarvestError> {
        self.advance(RunState::Processing)?;

        let total = index.len();
        let limit = self.config.harvest.language_limit();

        for (position, entry) in index.iter().enumerate() {
            tracing::info!(
                "Processing language: {} ({} of {})",
                entry.name,
                position + 1,
                total
            );

            let outcome = self.process_language(catalog, entry).await?;
            if outcome == LanguageOutcome::Unresolved {
                if let Some(country) = index.country_by_code(&entry.country_code) {
                    tracing::error!("'{}' is listed on {}", entry.code, country.url);
                }
            }
            if outcome.was_processed() && limit.is_some_and(|limit| self.stats.processed >= limit)
            {
                tracing::info!("Language limit reached after {} languages", self.stats.processed);
                break;
            }
        }

        Ok(())
    }

    /// Runs the per-language step for one index entry
    ///
    /// Resource and submission failures are logged and reflected in the
    /// outcome; only snapshot persistence failures are returned as errors.
    pub async fn process_language(
        &mut self,
        catalog: &ReferenceCatalog,
        entry: &IndexedLanguage,
    ) -> Result<LanguageOutcome, HarvestError> {
        let Some(record) = catalog.get(&entry.code) else {
            self.report_unresolved(catalog, entry);
            return Ok(LanguageOutcome::Unresolved);
        };
        let record = record.clone().with_url(&entry.url);

        if self.store.contains(&record.code) {
            tracing::info!("Language already processed today: {}", entry.name);
            self.stats.already_processed += 1;
            return Ok(LanguageOutcome::AlreadyProcessed);
        }

        let record = self.attach_resources(record).await;
        self.stats.processed += 1;

        let document = SnapshotDocument::new(self.store.date_stamp(), record);
        self.store.write_snapshot(&document)?;

        Ok(self.submit(&document, &entry.name).await)
    }

    async fn attach_resources(&mut self, record: LanguageRecord) -> LanguageRecord {
        match crawl_resources(&self.client, &record.url).await {
            Ok(resources) => record.with_resources(resources),
            Err(e) => {
                tracing::error!("Couldn't get resources for {}: {}", record.code, e);
                self.stats.unreachable_pages += 1;
                record.with_resources(Default::default())
            }
        }
    }

    async fn submit(&mut self, document: &SnapshotDocument, name: &str) -> LanguageOutcome {
        match self.ingest.submit(document).await {
            Ok(SubmitOutcome::Accepted) => {
                tracing::info!("Processing language: {} saved", name);
                self.stats.submitted += 1;
                LanguageOutcome::Submitted
            }
            Ok(SubmitOutcome::Rejected { status }) => {
                tracing::error!("Processing language: {}: not saved (HTTP {})", name, status);
                self.stats.rejected += 1;
                LanguageOutcome::Rejected { status }
            }
            Err(e) => {
                tracing::error!("Processing language: {}: not saved ({})", name, e);
                self.stats.submission_errors += 1;
                LanguageOutcome::SubmissionFailed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn report_unresolved(&mut self, catalog: &ReferenceCatalog, entry: &IndexedLanguage) {
        tracing::error!(
            "Language '{}' referenced in OLAC data ({}) but missing from the ISO language list",
            entry.code,
            entry.country_name
        );

        match catalog.languoid_by_iso(&entry.code) {
            Some(languoid) => tracing::error!("Languoid for '{}': {:?}", entry.code, languoid),
            None => tracing::error!(
                "Language '{}' also missing from the languoid list",
                entry.code
            ),
        }

        self.stats.unresolved.push(entry.code.clone());
    }

    fn advance(&mut self, next: RunState) -> Result<(), HarvestError> {
        if !self.state.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::debug!("Run state: {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}

/// Runs a complete harvest for today
///
/// # Example
///
/// ```no_run
/// use olac_harvest::config::Config;
/// use olac_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Config::default();
/// config.output.folder = "data".into();
/// let stats = run_harvest(config).await?;
/// println!("{} languages submitted", stats.submitted);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<RunStatistics, HarvestError> {
    let mut controller = RunController::new(config)?;
    controller.run().await
}
