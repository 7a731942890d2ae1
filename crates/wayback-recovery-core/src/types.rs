//! Core data types for recovered catalogue items
//!
//! Contains the record produced for every item-detail page.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field label -> field value for one section, in document order
pub type FieldMap = IndexMap<String, String>;

/// Section title -> fields, in document order
pub type SectionMap = IndexMap<String, FieldMap>;

/// Everything recovered from one item-detail page
///
/// Serializes with the on-disk field names used by `metadata.json`.
/// Link sets are unordered candidate pools; `BTreeSet` only makes the
/// serialized form stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemRecord {
    /// URL the page was fetched from
    #[serde(rename = "url")]
    pub source_url: String,

    /// Trimmed `<title>` text, empty when absent
    pub title: String,

    /// Labeled description sections
    #[serde(rename = "descriptive_metadata")]
    pub sections: SectionMap,

    /// Archive-hosted candidates, kept in their wrapped form
    #[serde(rename = "internet_archive")]
    pub archive_links: BTreeSet<String>,

    /// Direct media file links, resolved against the page URL
    #[serde(rename = "media_urls")]
    pub media_links: BTreeSet<String>,
}

impl ItemRecord {
    /// All download candidates: media links first, then archive links
    pub fn download_candidates(&self) -> Vec<&str> {
        self.media_links
            .iter()
            .chain(self.archive_links.iter())
            .map(String::as_str)
            .collect()
    }

    /// Returns true when nothing downloadable was found
    pub fn has_no_media(&self) -> bool {
        self.media_links.is_empty() && self.archive_links.is_empty()
    }
}

/// Output of the media link collector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaLinks {
    pub archive_links: BTreeSet<String>,
    pub media_links: BTreeSet<String>,
}
