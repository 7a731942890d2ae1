use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wayback_recovery_core::DEFAULT_BROWSE_PATH;

/// Recover catalogue records and media from Wayback Machine snapshots
#[derive(Debug, Parser)]
#[command(name = "wayback-recovery", version)]
#[command(about = "Recover archived catalogue records and media from the Wayback Machine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Discover items, save their metadata and download their media
    Run(RunArgs),
    /// List the item pages found on the browse page
    Discover(DiscoverArgs),
    /// Fetch one item page and print its record as JSON
    Extract {
        /// Wayback URL of the item-detail page
        url: String,
    },
    /// Print the original-site URL wrapped in a Wayback URL
    Rewrite {
        /// Wayback (or plain) URL
        url: String,
    },
}

/// Where to find the collection and how much of it to take
#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Full Wayback URL of the collection root, timestamp included
    pub wayback_root: String,

    /// Browse listing path, relative to the root
    #[arg(long, default_value = DEFAULT_BROWSE_PATH)]
    pub browse_path: String,

    /// Maximum number of items to process
    #[arg(long, default_value_t = 1000, conflicts_with = "all")]
    pub max_items: usize,

    /// Process every discovered item
    #[arg(long)]
    pub all: bool,

    /// Requests per second sent to the archive
    #[arg(long, default_value_t = 0.5)]
    pub rate: f64,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: DiscoverArgs,

    /// Output directory for metadata and media
    #[arg(short, long, default_value = "recovered_archive_data")]
    pub out_dir: PathBuf,

    /// Seconds to wait after each item
    #[arg(long, default_value_t = 2.0)]
    pub sleep_secs: f64,

    /// yt-dlp executable
    #[arg(long = "yt-dlp", default_value = "yt-dlp")]
    pub ytdlp_bin: String,

    /// Save metadata only
    #[arg(long)]
    pub no_download: bool,
}
