//! Crawler module for the archive's catalog pages
//!
//! This module contains the harvest pipeline, including:
//! - HTTP fetching of catalog pages
//! - Region, country and language detail page extraction
//! - The code-keyed language index
//! - Overall run coordination

mod coordinator;
mod country;
mod fetcher;
mod index;
mod parser;
mod region;
mod resources;

pub use coordinator::{run_harvest, CrawlIndex, LanguageOutcome, RunController};
pub use country::{crawl_countries, parse_country_page, Country, LanguageListing};
pub use fetcher::{build_http_client, fetch_page, user_agent_string};
pub use index::{IndexDocument, IndexedLanguage, LanguageIndex};
pub use parser::{extract_listing, split_name_count, ListingEntry, LISTING_ITEM_SELECTOR};
pub use region::{crawl_regions, parse_region_page, CountryStub, Region};
pub use resources::{crawl_resources, parse_resource_page, ONLINE_INDICATOR_CLASS};
