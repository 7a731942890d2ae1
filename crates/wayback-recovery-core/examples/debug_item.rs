//! Debug script to inspect what the parsers see on one archived item page
//!
//! Run with: cargo run --example debug_item -p wayback-recovery-core -- <wayback-url>

use wayback_recovery_core::{extract_item, ArchiveClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .ok_or("usage: debug_item <wayback-url>")?;

    let client = ArchiveClient::new()?;
    println!("Fetching {}...\n", url);
    let html = client.fetch(&url).await?;

    // Save HTML to file for inspection
    std::fs::write("debug_item.html", &html)?;
    println!("HTML saved to debug_item.html");

    let record = extract_item(&html, &url)?;

    println!("\nTitle: {}", record.title);
    println!("Sections: {}", record.sections.len());
    for (section, fields) in &record.sections {
        println!("  {} ({} fields)", section, fields.len());
    }
    println!("Archive links: {}", record.archive_links.len());
    println!("Media links: {}", record.media_links.len());

    println!("\n=== Record ===\n");
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
