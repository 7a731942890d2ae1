//! Browse page parser
//!
//! Discovers item-detail page URLs on an archived browse/listing page.

use std::collections::BTreeSet;

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{RecoveryError, Result};
use crate::url::{parse_url, resolve, ArchiveScope};

/// Path fragments of listing-page furniture (pagination, facets, search)
const NAVIGATION_FRAGMENTS: [&str; 2] = ["informationobject/browse", "search/advanced"];

/// Parses a browse page and returns the item-detail URLs it links to
///
/// # Arguments
/// * `html` - Raw HTML of the browse page
/// * `archive_root` - Wayback URL of the archived collection root
/// * `fetch_origin` - Origin relative links are resolved against
///   (the archive, not the archived site)
///
/// # Returns
/// Absolute URLs, deduplicated and sorted. Empty if nothing matched.
///
/// # Errors
/// Returns `InvalidUrl` if `archive_root` or `fetch_origin` is unusable
pub fn parse_item_links(html: &str, archive_root: &str, fetch_origin: &str) -> Result<Vec<String>> {
    let scope = ArchiveScope::from_base(archive_root)?;
    let origin = parse_url(fetch_origin)?;

    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]")
        .map_err(|e| RecoveryError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let mut links = BTreeSet::new();

    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if is_navigation_link(href) {
            continue;
        }

        let Some(full) = resolve(&origin, href) else {
            debug!(href = %href, "Skipping unresolvable link");
            continue;
        };

        // Either the raw href or its resolved form may put a link in scope
        if scope.classify(href) || scope.classify(&full) {
            links.insert(full);
        } else {
            debug!(href = %href, full = %full, "Skipping link outside archived site");
        }
    }

    Ok(links.into_iter().collect())
}

/// Returns true for links that belong to the listing page itself
fn is_navigation_link(href: &str) -> bool {
    NAVIGATION_FRAGMENTS.iter().any(|fragment| href.contains(fragment))
}
