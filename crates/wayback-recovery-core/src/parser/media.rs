//! Media link parser for item-detail pages
//!
//! Collects download candidates from an item page: links hosted by the
//! web archive itself, and links that point straight at media files.

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::{RecoveryError, Result};
use crate::types::MediaLinks;
use crate::url::{is_archive_hosted, parse_url, resolve};

/// Links containing any of these are never media
///
/// Export endpoints and documentation of the cataloguing software,
/// plus social networks.
const IGNORE_URL_PARTS: [&str; 4] = [
    "docs.accesstomemory.org",
    "/downloads/exports/",
    "facebook.com",
    "twitter.com",
];

/// Archive-hosted files that are metadata rather than content
const METADATA_EXTENSIONS: [&str; 3] = [".xml", ".pdf", ".txt"];

/// Video and image containers worth handing to the downloader
const MEDIA_EXTENSIONS: [&str; 8] = [
    ".mp4", ".mkv", ".webm", ".ogg", ".mov", ".jpg", ".png", ".gif",
];

/// Parses item page HTML and collects archive and media links
///
/// # Arguments
/// * `html` - Raw HTML string from an item-detail page
/// * `page_url` - URL of the page, used to resolve relative media links
///
/// # Returns
/// Deduplicated [`MediaLinks`]; both sets may be empty
///
/// # Errors
/// Returns `InvalidUrl` if `page_url` cannot be parsed
pub fn parse_media_links(html: &str, page_url: &str) -> Result<MediaLinks> {
    let document = Html::parse_document(html);
    collect_media_links(&document, page_url)
}

pub(crate) fn collect_media_links(document: &Html, page_url: &str) -> Result<MediaLinks> {
    let base = parse_url(page_url)?;
    let mut links = MediaLinks::default();

    let anchor_selector = selector("a[href]")?;
    for element in document.select(&anchor_selector) {
        if let Some(href) = element.value().attr("href") {
            classify_href(href, &base, &mut links);
        }
    }

    let video_selector = selector("video")?;
    let source_selector = selector("source[src]")?;
    for video in document.select(&video_selector) {
        let nested = video
            .select(&source_selector)
            .filter_map(|source| source.value().attr("src"));

        for src in video.value().attr("src").into_iter().chain(nested) {
            add_resolved(src, &base, &mut links);
        }
    }

    Ok(links)
}

/// Sorts one anchor target into the archive and/or media sets
fn classify_href(href: &str, base: &Url, links: &mut MediaLinks) {
    if IGNORE_URL_PARTS.iter().any(|part| href.contains(part)) {
        debug!(href = %href, "Ignoring non-media link");
        return;
    }

    let lower = href.to_lowercase();

    if is_archive_hosted(href) {
        if is_snapshot_index(&lower) || has_extension(&lower, &METADATA_EXTENSIONS) {
            debug!(href = %href, "Skipping archive navigation or metadata file");
            return;
        }
        // Kept wrapped: the downloader de-waybacks it later
        links.archive_links.insert(href.to_string());
    }

    if has_extension(&lower, &MEDIA_EXTENSIONS) {
        add_resolved(href, base, links);
    }
}

/// Snapshot listings and calendar pages of the archive
fn is_snapshot_index(href: &str) -> bool {
    href.contains("/web/") && (href.ends_with('/') || href.contains("index.html"))
}

fn has_extension(href: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| href.ends_with(ext))
}

fn add_resolved(reference: &str, base: &Url, links: &mut MediaLinks) {
    match resolve(base, reference) {
        Some(url) => {
            links.media_links.insert(url);
        }
        None => debug!(reference = %reference, "Skipping unresolvable media link"),
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| RecoveryError::ParseError(format!("Invalid selector: {:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://web.archive.org/web/20200101000000/http://original.org/harbour-film";

    fn collect(html: &str) -> MediaLinks {
        parse_media_links(html, PAGE).unwrap()
    }

    #[test]
    fn test_parse_empty_html() {
        let links = collect("<html><body></body></html>");
        assert!(links.archive_links.is_empty());
        assert!(links.media_links.is_empty());
    }

    #[test]
    fn test_invalid_page_url() {
        let result = parse_media_links("<a href='a.mp4'>a</a>", "not a url");
        assert!(matches!(result, Err(RecoveryError::InvalidUrl(_))));
    }

    #[test]
    fn test_archive_details_link_kept_unresolved() {
        let links = collect(r#"<a href="https://archive.org/details/harbour-film">Watch</a>"#);
        assert!(links.archive_links.contains("https://archive.org/details/harbour-film"));
        assert!(links.media_links.is_empty());
    }

    #[test]
    fn test_archive_pdf_under_snapshot_path_excluded() {
        let links = collect(
            r#"<a href="https://web.archive.org/web/2020/http://original.org/finding-aid.pdf">PDF</a>"#,
        );
        assert!(links.archive_links.is_empty());
        assert!(links.media_links.is_empty());
    }

    #[test]
    fn test_archive_metadata_files_excluded() {
        let html = r#"
        <a href="https://archive.org/download/film/film_meta.XML">meta</a>
        <a href="https://archive.org/download/film/film_files.txt">files</a>
        "#;
        let links = collect(html);
        assert!(links.archive_links.is_empty());
    }

    #[test]
    fn test_snapshot_index_pages_excluded() {
        let html = r#"
        <a href="https://web.archive.org/web/2020/http://original.org/">Home</a>
        <a href="https://web.archive.org/web/2020/http://original.org/index.html">Index</a>
        "#;
        let links = collect(html);
        assert!(links.archive_links.is_empty());
        assert!(links.media_links.is_empty());
    }

    #[test]
    fn test_mp4_resolved_against_page() {
        let html = r#"
        <a href="media/reel1.mp4">Reel 1</a>
        <a href="http://cdn.example.net/reel2.MP4">Reel 2</a>
        "#;
        let links = collect(html);

        assert!(links.archive_links.is_empty());
        assert!(links.media_links.contains(
            "https://web.archive.org/web/20200101000000/http://original.org/media/reel1.mp4"
        ));
        assert!(links.media_links.contains("http://cdn.example.net/reel2.MP4"));
    }

    #[test]
    fn test_archive_hosted_media_in_both_sets() {
        let href = "https://ia800.us.archive.org/1/items/film/film.mp4";
        let links = collect(&format!(r#"<a href="{}">film</a>"#, href));

        assert!(links.archive_links.contains(href));
        assert!(links.media_links.contains(href));
    }

    #[test]
    fn test_ignore_list_enforced() {
        let html = r#"
        <a href="https://www.facebook.com/sharer.php?u=clip.mp4">Share</a>
        <a href="https://twitter.com/intent/tweet?url=archive.org/clip.jpg">Tweet</a>
        <a href="/web/2020/http://original.org/downloads/exports/ead.mp4">EAD</a>
        <a href="https://docs.accesstomemory.org/logo.png">AtoM</a>
        "#;
        let links = collect(html);
        assert!(links.archive_links.is_empty());
        assert!(links.media_links.is_empty());
    }

    #[test]
    fn test_lookalike_archive_host_not_archive_hosted() {
        let links = collect(r#"<a href="https://notarchive.org/details/film">x</a>"#);
        assert!(links.archive_links.is_empty());
    }

    #[test]
    fn test_video_sources_collected() {
        let html = r#"
        <video src="/web/2020/http://original.org/uploads/main.webm" controls>
            <source src="uploads/alt.mp4" type="video/mp4">
            <source type="video/ogg">
        </video>
        <video><source src="https://cdn.example.net/stream"></video>
        "#;
        let links = collect(html);

        assert_eq!(links.media_links.len(), 3);
        assert!(links.media_links.contains("https://web.archive.org/web/2020/http://original.org/uploads/main.webm"));
        assert!(links.media_links.contains(
            "https://web.archive.org/web/20200101000000/http://original.org/uploads/alt.mp4"
        ));
        assert!(links.media_links.contains("https://cdn.example.net/stream"));
    }

    #[test]
    fn test_duplicates_collapsed() {
        let html = r#"
        <a href="media/reel1.mp4">Reel 1</a>
        <a href="media/reel1.mp4"><img src="thumb.jpg"></a>
        <video><source src="media/reel1.mp4"></video>
        <a href="https://archive.org/details/reel">x</a>
        <a href="https://archive.org/details/reel">y</a>
        "#;
        let links = collect(html);
        assert_eq!(links.media_links.len(), 1);
        assert_eq!(links.archive_links.len(), 1);
    }

    #[test]
    fn test_non_media_links_ignored() {
        let html = r#"
        <a href="/web/2020/http://original.org/repository/harbour-trust">Repository</a>
        <a href="mailto:archivist@original.org">Contact</a>
        "#;
        let links = collect(html);
        assert!(links.archive_links.is_empty());
        assert!(links.media_links.is_empty());
    }
}
