//! Language record types
//!
//! A `LanguageRecord` is created from the ISO list and then replaced, never
//! mutated, by each enrichment step: `with_classification` during
//! unification, `with_url` once the crawl index is known and
//! `with_resources` after the detail page is fetched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource groups keyed by category label
pub type Resources = BTreeMap<String, ResourceGroup>;

/// One language, unified across the ISO list, the languoid list and the crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub code: String,
    pub name: String,
    #[serde(rename = "coords")]
    pub coordinates: [String; 2],
    pub level: String,
    pub status: String,
    pub glotto_id: String,
    pub glotto_family_id: String,
    pub glotto_parent_id: String,
    pub url: String,
    pub resources: Resources,
}

impl LanguageRecord {
    /// Creates a base record as read from the ISO list
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        coordinates: [String; 2],
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            coordinates,
            ..Self::default()
        }
    }

    /// Returns the record with the languoid classification fields replaced
    pub fn with_classification(self, languoid: &Languoid) -> Self {
        Self {
            level: languoid.level.clone(),
            status: languoid.status.clone(),
            glotto_id: languoid.id.clone(),
            glotto_family_id: languoid.family_id.clone(),
            glotto_parent_id: languoid.parent_id.clone(),
            ..self
        }
    }

    /// Returns the record with its detail-page URL replaced
    pub fn with_url(self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self
        }
    }

    /// Returns the record with its resource groups replaced
    pub fn with_resources(self, resources: Resources) -> Self {
        Self { resources, ..self }
    }
}

/// A category of resources listed on a language's detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Number of list items in the category
    pub count: usize,

    /// Structured items, in page order
    #[serde(rename = "resources")]
    pub items: Vec<ResourceItem>,
}

/// A single entry of a resource group
///
/// Only the fields seen in the markup are set; absent fields are left out of
/// the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A row of the Glottolog languoid classification list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Languoid {
    pub id: String,
    pub family_id: String,
    pub parent_id: String,
    pub level: String,
    pub status: String,
    pub iso_code: Option<String>,
}
