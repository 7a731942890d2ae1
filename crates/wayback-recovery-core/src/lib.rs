//! Wayback Catalogue Recovery Core Library
//!
//! Recovers descriptive records and media links from archived catalogue
//! sites (such as AtoM instances) preserved by the Wayback Machine.
//!
//! # Overview
//!
//! This crate provides:
//! - Pure HTML parsers that discover item pages on a browse listing and turn
//!   an item page into a sectioned metadata record with media candidates
//! - URL helpers that strip Wayback proxy wrapping and classify link scope
//! - A rate-limited HTTP client, a JSON record store and a `yt-dlp`
//!   dispatcher, tied together by a sequential recovery loop
//!
//! # Example
//!
//! ```
//! use wayback_recovery_core::{extract_item, Result};
//!
//! fn main() -> Result<()> {
//!     let html = r#"
//!         <title>Harbour film</title>
//!         <h2>Identity area</h2>
//!         <p><strong>Creator:</strong> Jane R. Doe</p>
//!         <a href="media/harbour.mp4">Watch</a>
//!     "#;
//!     let page = "https://web.archive.org/web/20200101000000/http://original.org/harbour-film";
//!
//!     let record = extract_item(html, page)?;
//!     assert_eq!(record.title, "Harbour film");
//!     assert_eq!(record.sections["Identity area"]["Creator"], "Jane R. Doe");
//!     assert_eq!(record.media_links.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! Running a full recovery:
//!
//! ```no_run
//! use wayback_recovery_core::{RecoveryConfig, WaybackRecovery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = RecoveryConfig::new("https://web.archive.org/web/20200101000000/http://original.org/");
//!     let summary = WaybackRecovery::new(config)?.run().await?;
//!     println!("{} of {} items saved", summary.saved, summary.scheduled);
//!     Ok(())
//! }
//! ```
//!
//! # Politeness
//!
//! The recovery loop is strictly sequential. Every request goes through the
//! client's rate limiter and the loop pauses after each item.

mod client;
mod config;
pub mod download;
mod error;
pub mod parser;
mod recovery;
pub mod store;
mod types;
pub mod url;

// Re-export client types
pub use client::{ArchiveClient, ClientConfig, RateLimiter};

// Re-export configuration
pub use config::{RecoveryConfig, DEFAULT_BROWSE_PATH};

// Re-export error types
pub use error::{RecoveryError, Result};

// Re-export parser functions
pub use parser::{extract_item, parse_item_links, parse_media_links, parse_sections, parse_title};

// Re-export main recovery API
pub use recovery::{RunSummary, WaybackRecovery};

// Re-export harness pieces
pub use download::MediaDownloader;
pub use store::{safe_name, ItemStore};

// Re-export data types
pub use types::{FieldMap, ItemRecord, MediaLinks, SectionMap};

// Re-export URL helper functions for convenience
pub use crate::url::{classify_scope, is_archive_hosted, rewrite, ArchiveScope};
