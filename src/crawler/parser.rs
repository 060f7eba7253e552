//! Shared HTML extraction for catalog listing pages
//!
//! Region and country pages use the same layout: the listing sits in the
//! second table of the page as `tr > td > ul > li` items, each item holding
//! an anchor followed by a parenthesised count, e.g.
//! `<li><a href="/country/PG">Papua New Guinea</a> (848)</li>`.

use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};

/// Selector for the list items of a catalog listing page
///
/// The parser inserts the implicit `tbody` between `table` and `tr`.
pub const LISTING_ITEM_SELECTOR: &str = "table:nth-of-type(2) > tbody > tr > td > ul > li";

/// One list item of a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Full text content of the item
    pub text: String,

    /// `href` of the item's first direct anchor child
    pub href: Option<String>,
}

impl ListingEntry {
    /// Text before the first `(`, trimmed
    pub fn name(&self) -> String {
        split_name_count(&self.text).0
    }

    /// Text between the first `(` and the following `)`
    pub fn count(&self) -> Option<String> {
        split_name_count(&self.text).1
    }

    /// The anchor href, or an error naming the page and item
    pub fn require_href(&self, page_url: &str) -> Result<&str, HarvestError> {
        self.href.as_deref().ok_or_else(|| HarvestError::HtmlParse {
            url: page_url.to_string(),
            message: format!("list item '{}' has no link", self.text.trim()),
        })
    }
}

/// Extracts the listing items of a region or country page
pub fn extract_listing(html: &str, page_url: &str) -> Result<Vec<ListingEntry>, HarvestError> {
    let document = Html::parse_document(html);
    let selector = parse_selector(LISTING_ITEM_SELECTOR, page_url)?;

    let entries = document
        .select(&selector)
        .map(|item| ListingEntry {
            text: item.text().collect::<String>(),
            href: child_elements(item)
                .find(|child| child.value().name() == "a")
                .and_then(|anchor| anchor.value().attr("href"))
                .map(str::to_string),
        })
        .collect();

    Ok(entries)
}

/// Splits `Name (count)` at the first parenthesis pair
///
/// # Examples
///
/// ```
/// use olac_harvest::crawler::split_name_count;
///
/// assert_eq!(
///     split_name_count("Papua New Guinea (848)"),
///     ("Papua New Guinea".to_string(), Some("848".to_string()))
/// );
/// assert_eq!(split_name_count("Tok Pisin"), ("Tok Pisin".to_string(), None));
/// ```
pub fn split_name_count(text: &str) -> (String, Option<String>) {
    match text.split_once('(') {
        Some((name, rest)) => {
            let count = rest.split(')').next().unwrap_or_default().trim().to_string();
            (name.trim().to_string(), Some(count))
        }
        None => (text.trim().to_string(), None),
    }
}

/// Parses a CSS selector, reporting failures against the page being parsed
pub(crate) fn parse_selector(selector: &str, page_url: &str) -> Result<Selector, HarvestError> {
    Selector::parse(selector).map_err(|e| HarvestError::HtmlParse {
        url: page_url.to_string(),
        message: format!("invalid selector '{}': {:?}", selector, e),
    })
}

/// Iterates the element children of an element, skipping text and comments
pub(crate) fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}
