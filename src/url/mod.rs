//! URL helpers for archive page addresses
//!
//! The archive encodes its catalog keys in URL paths: regions live at
//! `/area/<region>`, countries at `/country/<code>` and languages at
//! `/language/<code>`. These helpers pull those keys out and resolve
//! relative links against the site root.

use url::Url;

/// Returns the site root (scheme, host and port) of a URL
///
/// # Examples
///
/// ```
/// use olac_harvest::url::site_root;
/// use url::Url;
///
/// let page = Url::parse("http://www.language-archives.org/area/asia").unwrap();
/// assert_eq!(site_root(&page).as_str(), "http://www.language-archives.org/");
/// ```
pub fn site_root(url: &Url) -> Url {
    let mut root = url.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

/// Resolves an href against the site root of `page`
///
/// Leading slashes are ignored, so `/language/eng` and `language/eng` both
/// land at `<root>/language/eng`.
pub fn resolve_against_root(page: &Url, href: &str) -> Result<Url, url::ParseError> {
    site_root(page).join(href.trim().trim_start_matches('/'))
}

/// Returns the last non-empty path segment of a URL string
pub fn last_segment(url: &str) -> Option<String> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && !s.contains(':'))
        .map(str::to_string)
}

/// Returns what follows `marker` in a URL string, e.g. the country code
/// after `/country/`
pub fn segment_after(url: &str, marker: &str) -> Option<String> {
    url.split_once(marker)
        .map(|(_, rest)| rest.trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
}

/// Returns the path segment at `index` of an href, counting from the first
/// segment after the leading slash
///
/// `/language/eng` has `language` at index 0 and `eng` at index 1.
pub fn href_segment(href: &str, index: usize) -> Option<String> {
    href.trim()
        .trim_start_matches('/')
        .split('/')
        .nth(index)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_root_drops_path_and_query() {
        let url = Url::parse("http://localhost:8080/language/eng?x=1#top").unwrap();
        assert_eq!(site_root(&url).as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_resolve_against_root() {
        let page = Url::parse("http://www.language-archives.org/language/eng").unwrap();
        assert_eq!(
            resolve_against_root(&page, "/item/oai:example:1").unwrap().as_str(),
            "http://www.language-archives.org/item/oai:example:1"
        );
        assert_eq!(
            resolve_against_root(&page, "item/x").unwrap().as_str(),
            "http://www.language-archives.org/item/x"
        );
    }

    #[test]
    fn test_resolve_absolute_href() {
        let page = Url::parse("http://www.language-archives.org/language/eng").unwrap();
        assert_eq!(
            resolve_against_root(&page, "https://other.org/a").unwrap().as_str(),
            "https://other.org/a"
        );
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(
            last_segment("http://www.language-archives.org/area/pacific"),
            Some("pacific".to_string())
        );
        assert_eq!(
            last_segment("http://www.language-archives.org/area/asia/"),
            Some("asia".to_string())
        );
        assert_eq!(last_segment("http://"), None);
    }

    #[test]
    fn test_segment_after() {
        assert_eq!(
            segment_after("http://www.language-archives.org/country/PG", "/country/"),
            Some("PG".to_string())
        );
        assert_eq!(segment_after("http://example.com/area/x", "/country/"), None);
    }

    #[test]
    fn test_href_segment() {
        assert_eq!(href_segment("/language/eng", 1), Some("eng".to_string()));
        assert_eq!(href_segment("language/eng", 0), Some("language".to_string()));
        assert_eq!(href_segment("/language", 1), None);
    }
}
