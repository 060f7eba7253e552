//! Joins the ISO language list with the languoid classification

use crate::catalog::types::{LanguageRecord, Languoid};
use std::collections::{BTreeMap, HashMap};

/// Outcome of unifying the two reference lists
#[derive(Debug, Clone, Default)]
pub struct UnifiedCatalog {
    /// Enriched records, keyed by language code
    pub languages: BTreeMap<String, LanguageRecord>,

    /// Codes with no languoid carrying the same ISO code
    pub unclassified: Vec<String>,
}

/// Enriches every language with the languoid sharing its ISO code
///
/// Languages without a matching languoid keep their empty classification
/// fields; they are listed in `unclassified` as a coverage gap, not an
/// error.
pub fn unify(
    languages: BTreeMap<String, LanguageRecord>,
    languoids_by_iso: &HashMap<String, Languoid>,
) -> UnifiedCatalog {
    let mut unified = UnifiedCatalog::default();

    for (code, record) in languages {
        let record = match languoids_by_iso.get(&code) {
            Some(languoid) => record.with_classification(languoid),
            None => {
                tracing::trace!("No languoid for ISO code {}", code);
                unified.unclassified.push(code.clone());
                record
            }
        };
        unified.languages.insert(code, record);
    }

    tracing::info!(
        "Unified {} languages ({} without a languoid match)",
        unified.languages.len(),
        unified.unclassified.len()
    );

    unified
}
