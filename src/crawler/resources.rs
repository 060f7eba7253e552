//! Language detail pages: resource groups
//!
//! Each `ol` on a detail page is one resource category. Its label is the
//! text of the element right before it; its items are the `li` children.
//! Inside an item, element kinds decide what gets recorded:
//!
//! | element                        | effect                         |
//! |--------------------------------|--------------------------------|
//! | `span.online_indicator`        | `is_online = true`             |
//! | `a`                            | `url` (site-root resolved), `name` |
//! | anything else                  | `text` = outer markup + tail text |

use crate::catalog::{ResourceGroup, ResourceItem, Resources};
use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::{child_elements, parse_selector};
use crate::url::resolve_against_root;
use crate::HarvestError;
use reqwest::Client;
use scraper::{ElementRef, Html};
use url::Url;

/// Class marking an item as available online
pub const ONLINE_INDICATOR_CLASS: &str = "online_indicator";

/// Fetches a language's detail page and extracts its resource groups
///
/// Fails with `PageUnreachable`/`PageStatus` when the page cannot be
/// fetched; the caller keeps going with empty resources.
pub async fn crawl_resources(client: &Client, page_url: &str) -> Result<Resources, HarvestError> {
    let html = fetch_page(client, page_url).await?;
    parse_resource_page(&html, page_url)
}

/// Parses the resource groups of a detail page
///
/// Duplicate category labels overwrite earlier groups.
pub fn parse_resource_page(html: &str, page_url: &str) -> Result<Resources, HarvestError> {
    let base = Url::parse(page_url)?;
    let document = Html::parse_document(html);
    let ol_selector = parse_selector("ol", page_url)?;

    let mut resources = Resources::new();
    for list in document.select(&ol_selector) {
        let label = category_label(list);
        let items: Vec<ResourceItem> = child_elements(list)
            .filter(|child| child.value().name() == "li")
            .map(|li| parse_item(li, &base))
            .collect();

        tracing::debug!("Processing: {}, found: {}", label, items.len());

        resources.insert(
            label,
            ResourceGroup {
                count: items.len(),
                items,
            },
        );
    }

    Ok(resources)
}

/// Text of the nearest preceding sibling element, or empty
fn category_label(list: ElementRef<'_>) -> String {
    list.prev_siblings()
        .find_map(ElementRef::wrap)
        .map(|heading| heading.text().collect::<String>())
        .unwrap_or_default()
}

fn parse_item(li: ElementRef<'_>, base: &Url) -> ResourceItem {
    let mut item = ResourceItem::default();

    for element in child_elements(li) {
        let value = element.value();
        match value.name() {
            "span" if value.attr("class") == Some(ONLINE_INDICATOR_CLASS) => {
                item.is_online = Some(true);
            }
            "a" => {
                item.url = value
                    .attr("href")
                    .and_then(|href| resolve_against_root(base, href).ok())
                    .map(|url| url.to_string());
                item.name = Some(element.text().collect::<String>());
            }
            _ => {
                let mut markup = element.html();
                let tail = element.next_sibling().and_then(|node| node.value().as_text());
                if let Some(tail) = tail {
                    markup.push_str(tail);
                }
                item.text = Some(markup);
            }
        }
    }

    item
}
