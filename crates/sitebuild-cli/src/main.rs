//! sitebuild CLI
//!
//! Regenerates the site's data files, about page and logs in one run.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use sitebuild_core::SiteConfig;
use sitebuild_core::config::{
    DEFAULT_NOTES, DEFAULT_RAW_DATA, NOTES_ENV, RAW_DATA_ENV, SITE_DIR_ENV,
};
use sitebuild_runtime::{Builder, PassOutcome};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// sitebuild - turn tracker exports and Obsidian notes into site content
#[derive(Parser)]
#[command(name = "sitebuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory of the tracker JSON exports
    #[arg(long, env = RAW_DATA_ENV, default_value = DEFAULT_RAW_DATA)]
    raw_data: PathBuf,

    /// Obsidian notes directory to publish from
    #[arg(long, env = NOTES_ENV, default_value = DEFAULT_NOTES)]
    notes: PathBuf,

    /// Site root (receives `_data/`, `_logs/` and `about.md`)
    #[arg(long, env = SITE_DIR_ENV, default_value = ".")]
    site_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SiteConfig::new(cli.raw_data, cli.notes, cli.site_dir);
    tracing::info!("raw data: {}", config.raw_data.display());
    tracing::info!("notes: {}", config.notes.display());
    tracing::info!("site: {}", config.site_dir.display());

    let report = Builder::new(config).run()?;

    for pass in &report.passes {
        match &pass.result {
            Ok(PassOutcome::Written { path, records }) => {
                tracing::debug!("{}: {} ({} records)", pass.name, path.display(), records);
            }
            Ok(PassOutcome::Skipped { reason }) => {
                tracing::info!("{}: skipped ({})", pass.name, reason);
            }
            // already logged by the builder
            Err(_) => {}
        }
    }

    let failed = report.failed();
    if !failed.is_empty() {
        bail!("build finished with failed passes: {}", failed.join(", "));
    }
    Ok(())
}
