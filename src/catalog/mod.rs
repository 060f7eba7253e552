//! Reference catalog module
//!
//! Loads the ISO language list and the Glottolog languoid list and unifies
//! them into one enriched `LanguageRecord` per language code. Nothing here
//! touches the network.

mod loader;
mod types;
mod unify;

pub use loader::{
    load_languages, load_languoids, parse_language_row, parse_languoid_row, read_languages,
    read_languoids, LanguoidTables, LANGUOID_ISO_COLUMN,
};
pub use types::{LanguageRecord, Languoid, ResourceGroup, ResourceItem, Resources};
pub use unify::{unify, UnifiedCatalog};

use crate::config::ReferenceConfig;
use crate::CatalogError;
use std::collections::BTreeMap;

/// Enriched language records plus the languoid tables kept for diagnostics
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    languages: BTreeMap<String, LanguageRecord>,
    languoids: LanguoidTables,
    unclassified: usize,
}

impl ReferenceCatalog {
    /// Loads both reference lists without unifying them
    pub fn load(config: &ReferenceConfig) -> Result<Self, CatalogError> {
        let languoids = load_languoids(&config.languoids)?;
        let languages = load_languages(&config.languages)?;
        Ok(Self::from_parts(languages, languoids))
    }

    /// Builds a catalog from already parsed tables
    pub fn from_parts(
        languages: BTreeMap<String, LanguageRecord>,
        languoids: LanguoidTables,
    ) -> Self {
        Self {
            languages,
            languoids,
            unclassified: 0,
        }
    }

    /// Replaces every record with its languoid-enriched version
    pub fn unify(self) -> Self {
        let unified = unify(self.languages, &self.languoids.by_iso_code);
        Self {
            languages: unified.languages,
            languoids: self.languoids,
            unclassified: unified.unclassified.len(),
        }
    }

    /// Returns the record for a language code
    pub fn get(&self, code: &str) -> Option<&LanguageRecord> {
        self.languages.get(code)
    }

    /// Looks a languoid up by ISO code
    pub fn languoid_by_iso(&self, code: &str) -> Option<&Languoid> {
        self.languoids.by_iso_code.get(code)
    }

    /// Number of language records
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns true if no language was loaded
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Languages left without a classification by the last `unify`
    pub fn unclassified_count(&self) -> usize {
        self.unclassified
    }
}
