//! Main recovery API
//!
//! Combines the HTTP client, parsers, store and downloader into the
//! sequential discover -> extract -> save -> download loop.

use std::path::Path;

use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::client::ArchiveClient;
use crate::config::RecoveryConfig;
use crate::download::MediaDownloader;
use crate::error::Result;
use crate::parser::{extract_item, parse_item_links};
use crate::store::ItemStore;
use crate::types::ItemRecord;

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Item pages scheduled after discovery and the item limit
    pub scheduled: usize,
    /// Records written to disk
    pub saved: usize,
    /// Items that failed to fetch, parse or save
    pub failed: usize,
    /// Candidates downloaded successfully
    pub downloads_ok: usize,
    /// Candidates the downloader failed on
    pub downloads_failed: usize,
}

/// Recovers an archived catalogue from the Wayback Machine
///
/// Items are processed strictly one at a time with a pause after each,
/// on top of the client's own request spacing.
pub struct WaybackRecovery {
    config: RecoveryConfig,
    client: ArchiveClient,
    store: ItemStore,
    downloader: MediaDownloader,
}

impl WaybackRecovery {
    /// Create a recovery run from its configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new(config: RecoveryConfig) -> Result<Self> {
        let client = ArchiveClient::with_config(config.client.clone())?;
        let store = ItemStore::new(&config.out_dir);
        let downloader = MediaDownloader::new(&config.ytdlp_bin);
        Ok(Self {
            config,
            client,
            store,
            downloader,
        })
    }

    /// The configuration this run uses
    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Fetch the browse page and list the item pages to process
    ///
    /// # Returns
    /// Sorted item URLs, truncated to `max_items`
    ///
    /// # Errors
    /// - `InvalidUrl` if the configured URLs are unusable
    /// - `HttpError`/`NotFound`/`RateLimited` if the browse page cannot be fetched
    pub async fn discover(&self) -> Result<Vec<String>> {
        let browse_url = self.config.browse_url()?;
        info!(url = %browse_url, "Fetching browse page");

        let html = self.client.fetch(&browse_url).await?;
        let mut links = parse_item_links(&html, &self.config.wayback_root, &self.config.fetch_origin)?;

        if let Some(max) = self.config.max_items {
            links.truncate(max);
        }
        Ok(links)
    }

    /// Fetch and parse a single item page
    pub async fn extract(&self, url: &str) -> Result<ItemRecord> {
        let html = self.client.fetch(url).await?;
        extract_item(&html, url)
    }

    /// Run the whole recovery
    ///
    /// A browse page failure aborts the run. Failures on an individual item
    /// or download are logged and the run moves on.
    pub async fn run(&self) -> Result<RunSummary> {
        let links = self.discover().await?;
        let total = links.len();
        info!(total, "Items scheduled for processing");

        let mut summary = RunSummary {
            scheduled: total,
            ..RunSummary::default()
        };

        for (i, link) in links.iter().enumerate() {
            let index = i + 1;
            info!(index, total, url = %link, "Processing item");

            match self.process_item(link, index, &mut summary).await {
                Ok(()) => summary.saved += 1,
                Err(e) => {
                    warn!(url = %link, error = %e, "Error processing item");
                    summary.failed += 1;
                }
            }

            sleep(self.config.sleep_between).await;
        }

        info!(
            saved = summary.saved,
            failed = summary.failed,
            downloads_ok = summary.downloads_ok,
            downloads_failed = summary.downloads_failed,
            "Recovery finished"
        );
        Ok(summary)
    }

    async fn process_item(&self, url: &str, index: usize, summary: &mut RunSummary) -> Result<()> {
        let record = self.extract(url).await?;

        let path = self.store.save(&record, index)?;
        info!(path = %path.display(), sections = record.sections.len(), "Metadata saved");

        if !self.config.download_media {
            return Ok(());
        }

        if record.has_no_media() {
            info!("No suitable media or Internet Archive link found");
            return Ok(());
        }

        let dir = self.store.item_dir(&record, index);
        self.download_all(&record, &dir, summary).await;
        Ok(())
    }

    async fn download_all(&self, record: &ItemRecord, dir: &Path, summary: &mut RunSummary) {
        let candidates = record.download_candidates();
        let count = candidates.len();
        info!(count, "Attempting downloads");

        for (i, url) in candidates.into_iter().enumerate() {
            let counter = (count > 1).then_some(i + 1);

            match self.downloader.download(url, dir, counter).await {
                Ok(()) => {
                    info!(index = i + 1, count, "Downloaded media");
                    summary.downloads_ok += 1;
                }
                Err(e) => {
                    warn!(url, error = %e, "Download failed");
                    summary.downloads_failed += 1;
                }
            }
        }
    }
}
