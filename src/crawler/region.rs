//! Region pages: the first level of the catalog

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::extract_listing;
use crate::url::{last_segment, resolve_against_root};
use crate::HarvestError;
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// A country as listed on its region page, before expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryStub {
    pub name: String,
    pub count: Option<String>,
    pub url: String,
}

/// A region page and the countries it lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Last path segment of the region URL, e.g. `pacific`
    pub key: String,
    pub url: String,
    pub countries: Vec<CountryStub>,
}

/// Parses the country stubs listed on a region page
pub fn parse_region_page(html: &str, page_url: &str) -> Result<Vec<CountryStub>, HarvestError> {
    let base = Url::parse(page_url)?;
    let mut countries = Vec::new();

    for entry in extract_listing(html, page_url)? {
        let href = entry.require_href(page_url)?;
        countries.push(CountryStub {
            name: entry.name(),
            count: entry.count(),
            url: resolve_against_root(&base, href)?.to_string(),
        });
    }

    Ok(countries)
}

/// Fetches and parses every region page, in order
///
/// Any fetch or parse failure aborts the crawl: a partial catalog is not
/// trustworthy.
pub async fn crawl_regions(client: &Client, pages: &[String]) -> Result<Vec<Region>, HarvestError> {
    let mut regions = Vec::with_capacity(pages.len());

    for page in pages {
        tracing::info!("Processing region: {}", page);

        let key = last_segment(page).ok_or_else(|| HarvestError::HtmlParse {
            url: page.clone(),
            message: "region URL has no path segment".to_string(),
        })?;
        let html = fetch_page(client, page).await?;
        let countries = parse_region_page(&html, page)?;

        tracing::debug!("Region {} lists {} countries", key, countries.len());
        regions.push(Region {
            key,
            url: page.clone(),
            countries,
        });
    }

    Ok(regions)
}
