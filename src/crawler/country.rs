//! Country pages: the second level of the catalog

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::extract_listing;
use crate::crawler::region::Region;
use crate::url::{href_segment, resolve_against_root, segment_after};
use crate::HarvestError;
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// A language as listed on a country page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageListing {
    pub name: String,
    pub url: String,
    pub code: String,
}

/// A country page and the languages it lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub name: String,
    pub country_code: String,
    pub region: String,
    pub count: Option<String>,
    pub url: String,
    pub languages: Vec<LanguageListing>,
}

/// Parses the language listings of a country page
///
/// The language code is the second path segment of each link
/// (`/language/<code>`).
pub fn parse_country_page(
    html: &str,
    page_url: &str,
) -> Result<Vec<LanguageListing>, HarvestError> {
    let base = Url::parse(page_url)?;
    let mut languages = Vec::new();

    for entry in extract_listing(html, page_url)? {
        let href = entry.require_href(page_url)?;
        let code = href_segment(href, 1).ok_or_else(|| HarvestError::HtmlParse {
            url: page_url.to_string(),
            message: format!("language link '{}' has no code segment", href),
        })?;

        languages.push(LanguageListing {
            name: entry.name(),
            url: resolve_against_root(&base, href)?.to_string(),
            code,
        });
    }

    Ok(languages)
}

/// Expands the countries of every region
///
/// With a limit, only the first `limit` countries of each region are
/// fetched. Failures abort the crawl.
pub async fn crawl_countries(
    client: &Client,
    regions: &[Region],
    limit: Option<usize>,
) -> Result<Vec<Country>, HarvestError> {
    let mut countries = Vec::new();

    for region in regions {
        let total = region.countries.len();
        let take = limit.unwrap_or(total);

        for (position, stub) in region.countries.iter().take(take).enumerate() {
            tracing::info!(
                "Processing country: {} ({} of {} in {})",
                stub.name,
                position + 1,
                total,
                region.key
            );

            let country_code =
                segment_after(&stub.url, "/country/").ok_or_else(|| HarvestError::HtmlParse {
                    url: stub.url.clone(),
                    message: "country URL has no /country/ segment".to_string(),
                })?;
            let html = fetch_page(client, &stub.url).await?;
            let languages = parse_country_page(&html, &stub.url)?;

            countries.push(Country {
                name: stub.name.clone(),
                country_code,
                region: region.key.clone(),
                count: stub.count.clone(),
                url: stub.url.clone(),
                languages,
            });
        }
    }

    Ok(countries)
}
