//! Item-detail page parser
//!
//! Composes the section and media parsers into one [`ItemRecord`].

use scraper::Html;

use crate::error::Result;
use crate::parser::media::collect_media_links;
use crate::parser::sections::{extract_sections, extract_title};
use crate::types::ItemRecord;

/// Parses an item-detail page into a complete record
///
/// The markup is parsed once; sections and media links are read from
/// the same document. No I/O, and identical input gives an identical record.
///
/// # Arguments
/// * `html` - Raw HTML string from the item-detail page
/// * `page_url` - URL the page was fetched from
///
/// # Errors
/// Returns `InvalidUrl` if `page_url` cannot be parsed
pub fn extract_item(html: &str, page_url: &str) -> Result<ItemRecord> {
    let document = Html::parse_document(html);

    let sections = extract_sections(&document)?;
    let media = collect_media_links(&document, page_url)?;

    Ok(ItemRecord {
        source_url: page_url.to_string(),
        title: extract_title(&document),
        sections,
        archive_links: media.archive_links,
        media_links: media.media_links,
    })
}
