//! Flattens the crawled countries into a code-keyed language index

use crate::crawler::country::{Country, LanguageListing};
use crate::crawler::region::{CountryStub, Region};
use serde::Serialize;
use std::collections::BTreeMap;

/// A crawled language with the context of the country that listed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedLanguage {
    pub code: String,
    pub name: String,
    pub url: String,
    pub country_name: String,
    pub country_code: String,
    pub region: String,
}

impl IndexedLanguage {
    fn from_listing(listing: &LanguageListing, country: &Country) -> Self {
        Self {
            code: listing.code.clone(),
            name: listing.name.clone(),
            url: listing.url.clone(),
            country_name: country.name.clone(),
            country_code: country.country_code.clone(),
            region: country.region.clone(),
        }
    }
}

/// Code-keyed index of every crawled language
///
/// Iteration is in code order. A code listed by several countries keeps the
/// entry of the last country crawled.
#[derive(Debug, Clone, Default)]
pub struct LanguageIndex {
    by_code: BTreeMap<String, IndexedLanguage>,
    countries_by_name: BTreeMap<String, Country>,
    countries_by_code: BTreeMap<String, Country>,
}

impl LanguageIndex {
    /// Builds the index from expanded countries, in crawl order
    pub fn build(countries: &[Country]) -> Self {
        let mut index = Self::default();

        for country in countries {
            index
                .countries_by_name
                .insert(country.name.clone(), country.clone());
            index
                .countries_by_code
                .insert(country.country_code.clone(), country.clone());

            for listing in &country.languages {
                if let Some(previous) = index.by_code.insert(
                    listing.code.clone(),
                    IndexedLanguage::from_listing(listing, country),
                ) {
                    tracing::trace!(
                        "Language {} listed by {} and {}",
                        listing.code,
                        previous.country_name,
                        country.name
                    );
                }
            }
        }

        tracing::info!(
            "Indexed {} languages from {} countries",
            index.by_code.len(),
            index.countries_by_name.len()
        );

        index
    }

    /// Returns the entry for a language code
    pub fn get(&self, code: &str) -> Option<&IndexedLanguage> {
        self.by_code.get(code)
    }

    /// Iterates the entries in code order
    pub fn iter(&self) -> impl Iterator<Item = &IndexedLanguage> {
        self.by_code.values()
    }

    /// Indexed language codes, sorted
    pub fn codes(&self) -> Vec<String> {
        self.by_code.keys().cloned().collect()
    }

    /// Looks a country up by its code
    pub fn country_by_code(&self, code: &str) -> Option<&Country> {
        self.countries_by_code.get(code)
    }

    /// Number of indexed languages
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns true if no language was indexed
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Document written as `index.json` next to the snapshots
#[derive(Debug, Clone, Serialize)]
pub struct IndexDocument {
    pub regions: BTreeMap<String, Vec<CountryStub>>,
    pub countries: BTreeMap<String, Country>,
    pub languages: Vec<String>,
}

impl IndexDocument {
    /// Collects the crawl hierarchy and the sorted language codes
    pub fn new(regions: &[Region], index: &LanguageIndex) -> Self {
        Self {
            regions: regions
                .iter()
                .map(|region| (region.key.clone(), region.countries.clone()))
                .collect(),
            countries: index.countries_by_name.clone(),
            languages: index.codes(),
        }
    }
}
