//! Recovery run configuration
//!
//! Everything the harness needs is carried in one explicit value; nothing
//! is read from ambient state.

use std::path::PathBuf;
use std::time::Duration;

use crate::client::ClientConfig;
use crate::error::{RecoveryError, Result};
use crate::url::{parse_url, WAYBACK_ORIGIN};

/// Browse listing of an AtoM catalogue, media-bearing items as cards
pub const DEFAULT_BROWSE_PATH: &str = "informationobject/browse?view=card&onlyMedia=1&topLod=0";

/// Configuration for one recovery run
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Full Wayback URL of the archived collection root, timestamp included
    pub wayback_root: String,
    /// Path of the browse listing, relative to `wayback_root`
    pub browse_path: String,
    /// Origin relative links on archived pages resolve against
    pub fetch_origin: String,
    /// Directory records and media are written to
    pub out_dir: PathBuf,
    /// Name or path of the `yt-dlp` executable
    pub ytdlp_bin: String,
    /// Upper bound on items processed; `None` processes all
    pub max_items: Option<usize>,
    /// Pause after each item (default: 2s)
    pub sleep_between: Duration,
    /// Hand candidates to the downloader (default: true)
    pub download_media: bool,
    /// HTTP client settings
    pub client: ClientConfig,
}

impl RecoveryConfig {
    /// Create a configuration for the given Wayback root with defaults
    pub fn new(wayback_root: impl Into<String>) -> Self {
        Self {
            wayback_root: wayback_root.into(),
            browse_path: DEFAULT_BROWSE_PATH.to_string(),
            fetch_origin: WAYBACK_ORIGIN.to_string(),
            out_dir: PathBuf::from("recovered_archive_data"),
            ytdlp_bin: "yt-dlp".to_string(),
            max_items: Some(1000),
            sleep_between: Duration::from_secs(2),
            download_media: true,
            client: ClientConfig::default(),
        }
    }

    /// The browse listing URL: `browse_path` joined onto `wayback_root`
    ///
    /// # Errors
    /// Returns `InvalidUrl` if the root cannot be parsed or joined
    pub fn browse_url(&self) -> Result<String> {
        let root = parse_url(&self.wayback_root)?;
        let joined = root
            .join(&self.browse_path)
            .map_err(|e| RecoveryError::InvalidUrl(format!("{}: {}", self.browse_path, e)))?;
        Ok(joined.to_string())
    }
}
