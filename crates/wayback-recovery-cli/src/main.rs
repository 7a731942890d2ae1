//! Wayback Catalogue Recovery CLI
//!
//! Command-line front-end for the recovery engine.
//!
//! # Usage
//!
//! ```text
//! wayback-recovery run https://web.archive.org/web/20200101000000/http://original.org/
//! wayback-recovery discover https://web.archive.org/web/20200101000000/http://original.org/ --max-items 20
//! wayback-recovery extract https://web.archive.org/web/20200101000000/http://original.org/harbour-film
//! wayback-recovery rewrite https://web.archive.org/web/20200101000000/http://original.org/a.mp4
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run(args).await,
        Commands::Discover(args) => commands::discover(args).await,
        Commands::Extract { url } => commands::extract(&url).await,
        Commands::Rewrite { url } => {
            commands::rewrite(&url);
            Ok(())
        }
    }
}
