//! Subcommand implementations
//!
//! Each command builds a [`RecoveryConfig`] from its arguments and hands
//! it to the core library.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use wayback_recovery_core::{rewrite as rewrite_url, RecoveryConfig, WaybackRecovery};

use crate::cli::{DiscoverArgs, RunArgs};

fn base_config(args: &DiscoverArgs) -> Result<RecoveryConfig> {
    anyhow::ensure!(args.rate > 0.0, "--rate must be positive");

    let mut config = RecoveryConfig::new(&args.wayback_root);
    config.browse_path = args.browse_path.clone();
    config.max_items = (!args.all).then_some(args.max_items);
    config.client.requests_per_second = args.rate;
    Ok(config)
}

/// Build the configuration for a full run
pub fn run_config(args: &RunArgs) -> Result<RecoveryConfig> {
    let mut config = base_config(&args.target)?;
    config.out_dir = args.out_dir.clone();
    config.sleep_between = Duration::try_from_secs_f64(args.sleep_secs)
        .context("--sleep-secs must be a non-negative number")?;
    config.ytdlp_bin = args.ytdlp_bin.clone();
    config.download_media = !args.no_download;
    Ok(config)
}

/// Discover, save and download everything
pub async fn run(args: RunArgs) -> Result<()> {
    let config = run_config(&args)?;
    let recovery = WaybackRecovery::new(config)?;

    let summary = recovery.run().await.context("Recovery aborted")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Print the item pages a run would process
pub async fn discover(args: DiscoverArgs) -> Result<()> {
    let recovery = WaybackRecovery::new(base_config(&args)?)?;

    let links = recovery
        .discover()
        .await
        .context("Failed to fetch browse page or find links")?;
    info!(count = links.len(), "Items discovered");

    for link in links {
        println!("{}", link);
    }
    Ok(())
}

/// Print the record of one item page
pub async fn extract(url: &str) -> Result<()> {
    let recovery = WaybackRecovery::new(RecoveryConfig::new(url))?;

    let record = recovery
        .extract(url)
        .await
        .with_context(|| format!("Failed to extract {}", url))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Print the de-waybacked form of a URL
pub fn rewrite(url: &str) {
    println!("{}", rewrite_url(url));
}
