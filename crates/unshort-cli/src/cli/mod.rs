//! CLI for unshort.

mod expand;
mod progress;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use unshort_core::config::{self, UnshortConfig};

pub use expand::run_expand;

/// Expand short URLs concurrently.
#[derive(Debug, Parser)]
#[command(name = "unshort")]
#[command(about = "Expand short URLs concurrently by following their redirects", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["url", "file"])))]
pub struct Cli {
    /// Short URL(s) to expand.
    #[arg(long, value_name = "URL", num_args = 1..)]
    pub url: Vec<String>,

    /// File with one short URL per line.
    #[arg(long, value_name = "INPUT_FILE")]
    pub file: Option<PathBuf>,

    /// Save output to a file instead of stdout.
    #[arg(long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Parallel workers [default: min(32, CPUs + 4)].
    #[arg(short, long, value_name = "N")]
    pub workers: Option<NonZeroUsize>,

    /// Proxy URL (http, https, socks4, socks4a, socks5, socks5h).
    #[arg(short, long, value_name = "PROXY_URL")]
    pub proxy: Option<String>,

    /// Disable colors.
    #[arg(long)]
    pub no_color: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Parse arguments, load config, and expand. `Ok(false)` means some input
    /// or resolution failed and was already reported.
    pub async fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let cfg = match config::load_or_init() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("config unavailable, using defaults: {:#}", e);
                UnshortConfig::default()
            }
        };
        tracing::debug!("loaded config: {:?}", cfg);
        run_expand(&cli, &cfg).await
    }
}

#[cfg(test)]
mod tests;
