//! URL helpers for Wayback Machine snapshots
//!
//! Strips archive-proxy wrapping from snapshot URLs and decides which
//! links belong to the archived site.

use url::Url;

use crate::error::{RecoveryError, Result};

/// Origin the archive serves snapshots from
pub const WAYBACK_ORIGIN: &str = "https://web.archive.org";

/// Prefixes of archive-proxy URLs (`<host>/web/<timestamp>/<original-url>`)
const PROXY_PREFIXES: [&str; 2] = ["https://web.archive.org/web/", "http://web.archive.org/web/"];

/// Host of the web archive itself
const ARCHIVE_DOMAIN: &str = "archive.org";

/// Returns the original-site URL embedded in an archive-proxy URL
///
/// First checks for the proxy prefix, then searches the remainder for the
/// first absolute `http(s)://` URL.
///
/// # Example
/// ```
/// use wayback_recovery_core::url::embedded_original_url;
/// let url = "https://web.archive.org/web/20200101000000/https://original.org/item/5";
/// assert_eq!(embedded_original_url(url), Some("https://original.org/item/5"));
/// assert_eq!(embedded_original_url("https://original.org/item/5"), None);
/// ```
pub fn embedded_original_url(url: &str) -> Option<&str> {
    let prefix = PROXY_PREFIXES.iter().find(|p| url.starts_with(*p))?;
    let rest = &url[prefix.len()..];

    rest.match_indices("http")
        .map(|(i, _)| &rest[i..])
        .find(|candidate| candidate.starts_with("http://") || candidate.starts_with("https://"))
}

/// Recovers the original-site URL from an archive-proxy URL
///
/// Returns the input unchanged when it is not a proxy URL, or when the
/// proxy prefix is present but no embedded absolute URL follows it.
///
/// # Example
/// ```
/// use wayback_recovery_core::url::rewrite;
/// let url = "https://web.archive.org/web/20200101000000/https://original.org/item/5";
/// assert_eq!(rewrite(url), "https://original.org/item/5");
/// assert_eq!(rewrite("https://original.org/item/5"), "https://original.org/item/5");
/// ```
pub fn rewrite(url: &str) -> String {
    embedded_original_url(url).unwrap_or(url).to_string()
}

/// Host component of an absolute URL, lowercased
fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
}

/// Returns true when the URL is hosted by the web archive itself
///
/// Compares the host component exactly: `archive.org` or any subdomain.
/// Relative references are never archive-hosted.
pub fn is_archive_hosted(url: &str) -> bool {
    match host_of(url) {
        Some(host) => {
            host == ARCHIVE_DOMAIN || host.ends_with(&format!(".{}", ARCHIVE_DOMAIN))
        }
        None => false,
    }
}

/// Domain scope of one archived site
///
/// Built once from the Wayback root of the collection and reused for
/// every link on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveScope {
    domain: String,
}

impl ArchiveScope {
    /// Derives the archived-site domain from an archive base URL
    ///
    /// The base is de-waybacked first, so
    /// `https://web.archive.org/web/<ts>/http://original.org/` yields
    /// `original.org`.
    ///
    /// # Errors
    /// Returns `InvalidUrl` if no host can be read from the base
    pub fn from_base(archive_base: &str) -> Result<Self> {
        let original = rewrite(archive_base);
        let domain = host_of(&original)
            .ok_or_else(|| RecoveryError::InvalidUrl(archive_base.to_string()))?;
        Ok(Self { domain })
    }

    /// The archived-site host
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns true if the URL belongs to the archived site
    ///
    /// Proxy URLs are judged by the URL they wrap.
    pub fn contains(&self, url: &str) -> bool {
        host_of(&rewrite(url)).is_some_and(|host| host == self.domain)
    }

    /// Returns true if the URL belongs to the archived site or is root-relative
    pub fn classify(&self, url: &str) -> bool {
        url.starts_with('/') || self.contains(url)
    }
}

/// Returns true if `url` is in scope of the site archived at `archive_base`
///
/// An unusable base puts nothing but root-relative paths in scope.
pub fn classify_scope(url: &str, archive_base: &str) -> bool {
    match ArchiveScope::from_base(archive_base) {
        Ok(scope) => scope.classify(url),
        Err(_) => url.starts_with('/'),
    }
}

/// Resolves a possibly relative reference against a base URL
pub fn resolve(base: &Url, reference: &str) -> Option<String> {
    base.join(reference.trim()).ok().map(String::from)
}

/// Parses a URL, mapping failures to `InvalidUrl`
pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| RecoveryError::InvalidUrl(format!("{}: {}", url, e)))
}
